//! devpair-core
//!
//! Core library for pairing Android devices and reading chat friend status
//! from their screens.
//!
//! This crate defines the canonical pair identity used as a storage key for a
//! device pairing, the UI hierarchy dump model, dump locators, and the
//! friend-status classifier the automation driver consults before deciding
//! whether to send a friend request.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, GUI driver, REST layer).

pub mod config;
pub mod dump;
pub mod pair;
pub mod status;

pub use config::{load_classifier_config, ClassifierConfig, FallbackPolicy};
pub use dump::{DirDumpLocator, DumpLocator, UiDump};
pub use pair::{derive, extract_ids, is_valid, DeviceId, PairId, PairIdError, TokenOrder};
pub use status::{classify, ClassificationReport, Evidence, FriendStatus, FriendStatusClassifier};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
