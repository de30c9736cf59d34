#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const ALREADY_FRIEND_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy rotation="0">
  <node index="0" text="" resource-id="" class="android.widget.FrameLayout" bounds="[0,0][1080,2340]">
    <node index="1" text="" resource-id="com.zing.zalo:id/chatinput_text" class="android.widget.EditText" bounds="[100,800][900,900]" />
    <node index="2" text="Gửi" resource-id="com.zing.zalo:id/btn_send" class="android.widget.Button" />
  </node>
</hierarchy>"#;

pub const NEED_REQUEST_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy rotation="0">
  <node index="0" text="" resource-id="" class="android.widget.FrameLayout">
    <node index="1" text="Kết bạn" resource-id="com.zing.zalo:id/btn_send_friend_request" class="android.widget.Button" bounds="[866,1150][1000,1222]" />
  </node>
</hierarchy>"#;

pub const LIMITED_PROFILE_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy rotation="0">
  <node index="0" text="" resource-id="" class="android.widget.FrameLayout">
    <node index="1" text="Bạn chưa thể xem nhật ký của người này" resource-id="" class="android.widget.TextView" bounds="[100,400][900,500]" />
  </node>
</hierarchy>"#;

pub const NO_SIGNAL_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy rotation="0">
  <node index="0" text="" resource-id="" class="android.widget.FrameLayout">
    <node index="1" text="Some random content" resource-id="com.zing.zalo:id/random_element" class="android.widget.TextView" bounds="[100,400][900,500]" />
  </node>
</hierarchy>"#;

/// Both markers present; the chat input wins.
pub const BOTH_MARKERS_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy rotation="0">
  <node index="0" text="" resource-id="" class="android.widget.FrameLayout">
    <node index="1" text="" resource-id="com.zing.zalo:id/btn_send_friend_request" class="android.widget.Button" />
    <node index="2" text="" resource-id="com.zing.zalo:id/chatinput_text" class="android.widget.EditText" />
  </node>
</hierarchy>"#;

pub const CORRUPT_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy rotation="0">
  <node index="0" text="" resource-id="com.zing.zalo:id/chatinput_text" class="android.widget.FrameLayout">
    <node index="1" text="unterminated"
"#;

/// Write `xml` into `dir` under the capture naming convention for `serial`.
pub fn write_dump(dir: &Path, serial: &str, suffix: &str, xml: &str) -> PathBuf {
    let name = format!("ui_dump_{}_{}.xml", serial.replace(['.', ':'], "_"), suffix);
    let path = dir.join(name);
    fs::write(&path, xml).expect("write dump fixture");
    path
}
