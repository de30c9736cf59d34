mod common;

use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime};

use devpair_core::dump::{
    dump_file_prefix, is_dump_for, DirDumpLocator, DumpLocator, DEFAULT_DUMP_DIR,
};
use tempfile::tempdir;

use common::{write_dump, NO_SIGNAL_XML};

fn set_mtime(path: &Path, secs_after_epoch: u64) {
    let when = SystemTime::UNIX_EPOCH + Duration::from_secs(secs_after_epoch);
    File::options().write(true).open(path).expect("open fixture").set_modified(when).expect("mtime");
}

#[test]
fn prefix_normalizes_dots_and_colons() {
    assert_eq!(dump_file_prefix("192.168.5.76:5555"), "ui_dump_192_168_5_76_5555_");
    assert_eq!(dump_file_prefix("emulator-5554"), "ui_dump_emulator-5554_");
}

#[test]
fn default_locator_uses_debug_dumps() {
    assert_eq!(DirDumpLocator::default().dir(), Path::new(DEFAULT_DUMP_DIR));
}

#[test]
fn latest_picks_newest_file_for_the_device() {
    let dir = tempdir().expect("tempdir");
    let old = write_dump(dir.path(), "192.168.5.76:5555", "1700000000", NO_SIGNAL_XML);
    let new = write_dump(dir.path(), "192.168.5.76:5555", "1700000100", NO_SIGNAL_XML);
    set_mtime(&old, 1_700_000_500);
    set_mtime(&new, 1_700_000_100);

    let locator = DirDumpLocator::new(dir.path());
    // Modification time decides, not the name.
    assert_eq!(locator.latest("192.168.5.76:5555"), Some(old));
}

#[test]
fn latest_breaks_mtime_ties_by_name() {
    let dir = tempdir().expect("tempdir");
    let a = write_dump(dir.path(), "emulator-5554", "a", NO_SIGNAL_XML);
    let b = write_dump(dir.path(), "emulator-5554", "b", NO_SIGNAL_XML);
    set_mtime(&a, 1_700_000_000);
    set_mtime(&b, 1_700_000_000);

    assert_eq!(DirDumpLocator::new(dir.path()).latest("emulator-5554"), Some(b));
}

#[test]
fn latest_ignores_other_devices_and_non_xml_files() {
    let dir = tempdir().expect("tempdir");
    write_dump(dir.path(), "192.168.1.100:5555", "x", NO_SIGNAL_XML);
    std::fs::write(dir.path().join("ui_dump_192_168_1_10_5555_x.txt"), NO_SIGNAL_XML)
        .expect("write txt");
    std::fs::create_dir(dir.path().join("ui_dump_192_168_1_10_5555_dir.xml")).expect("mkdir");

    let locator = DirDumpLocator::new(dir.path());
    assert_eq!(locator.latest("192.168.1.10:5555"), None);
    assert!(locator.latest("192.168.1.100:5555").is_some());
}

#[test]
fn bare_ip_serial_skips_port_qualified_dumps() {
    let dir = tempdir().expect("tempdir");
    let with_port = write_dump(dir.path(), "192.168.1.10:5555", "1700000000", NO_SIGNAL_XML);
    set_mtime(&with_port, 1_700_000_900);

    let locator = DirDumpLocator::new(dir.path());
    assert_eq!(locator.latest("192.168.1.10"), None);

    let bare = write_dump(dir.path(), "192.168.1.10", "1700000000", NO_SIGNAL_XML);
    set_mtime(&bare, 1_700_000_100);
    assert_eq!(locator.latest("192.168.1.10"), Some(bare));
    assert_eq!(locator.latest("192.168.1.10:5555"), Some(with_port));
}

#[test]
fn dump_ownership_by_file_name() {
    assert!(is_dump_for("192.168.1.10", "ui_dump_192_168_1_10_test.xml"));
    assert!(is_dump_for("192.168.1.10", "ui_dump_192_168_1_10_1700000000_2.xml"));
    assert!(!is_dump_for("192.168.1.10", "ui_dump_192_168_1_10_5555_test.xml"));
    assert!(!is_dump_for("192.168.1.10", "ui_dump_192_168_1_100_test.xml"));
    assert!(is_dump_for("192.168.1.10:5555", "ui_dump_192_168_1_10_5555_test.xml"));
    assert!(is_dump_for("emulator-5554", "ui_dump_emulator-5554_12_a.xml"));
    assert!(!is_dump_for("emulator-5554", "ui_dump_emulator-5554_a.txt"));
}

#[test]
fn missing_directory_finds_nothing() {
    let dir = tempdir().expect("tempdir");
    let locator = DirDumpLocator::new(dir.path().join("nope"));
    assert_eq!(locator.latest("192.168.1.100:5555"), None);
}
