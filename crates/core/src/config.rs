use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::status::FriendStatus;

/// What the classifier reports when a dump parsed fine but carried no signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    #[default]
    Unknown,
    /// Older call sites treat "no signal" as "send a request".
    NeedFriendRequest,
}

impl FallbackPolicy {
    pub fn status(self) -> FriendStatus {
        match self {
            FallbackPolicy::Unknown => FriendStatus::Unknown,
            FallbackPolicy::NeedFriendRequest => FriendStatus::NeedFriendRequest,
        }
    }
}

/// Markers, thresholds and policy for friend-status classification.
///
/// Every field has a default, so a config file only lists what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Resource-id fragment of the chat input box (present once already friends).
    pub chat_input_marker: String,
    /// Resource-id fragment of the "send friend request" button.
    pub send_request_marker: String,
    /// Text shown on a profile that is hidden from non-friends.
    pub limited_profile_phrases: Vec<String>,
    /// Dumps smaller than this are treated as truncated captures.
    pub min_dump_bytes: u64,
    /// Delay before the single retry of the dump lookup.
    pub wait_ms: u64,
    pub fallback: FallbackPolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            chat_input_marker: "chatinput_text".to_string(),
            send_request_marker: "btn_send_friend_request".to_string(),
            limited_profile_phrases: vec![
                "Bạn chưa thể xem nhật ký".to_string(),
                "Bạn không thể xem trang cá nhân".to_string(),
                "You can't view this profile".to_string(),
                "You cannot view this profile".to_string(),
            ],
            min_dump_bytes: 100,
            wait_ms: 1500,
            fallback: FallbackPolicy::Unknown,
        }
    }
}

impl ClassifierConfig {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

/// Load a classifier config from disk. `.yaml`/`.yml` files are read as YAML,
/// everything else as JSON.
pub fn load_classifier_config(path: &Path) -> Result<ClassifierConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read classifier config at {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let config = if is_yaml {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse classifier config YAML {}", path.display()))?
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse classifier config JSON {}", path.display()))?
    };
    Ok(config)
}
