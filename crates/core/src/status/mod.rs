//! Friend-status classification from UI hierarchy dumps.
//!
//! The automation driver asks, once per step, whether the chat account on the
//! other side is already a friend. The answer comes from what is on screen:
//!
//! - a chat input box means the accounts are already friends;
//! - a "send friend request" button, or a profile hidden from non-friends,
//!   means a request has to be sent;
//! - anything else is `UNKNOWN` (or the configured fallback).
//!
//! Classification never fails. A missing, truncated, unreadable or corrupt dump
//! yields `UNKNOWN` so the driver always gets a decision mid-sequence.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ClassifierConfig;
use crate::dump::{Bounds, DumpLocator, UiDump};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendStatus {
    AlreadyFriend,
    NeedFriendRequest,
    Unknown,
}

impl FriendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendStatus::AlreadyFriend => "ALREADY_FRIEND",
            FriendStatus::NeedFriendRequest => "NEED_FRIEND_REQUEST",
            FriendStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for FriendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown friend status '{0}'. Allowed: ALREADY_FRIEND, NEED_FRIEND_REQUEST, UNKNOWN")]
pub struct ParseFriendStatusError(pub String);

impl FromStr for FriendStatus {
    type Err = ParseFriendStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALREADY_FRIEND" => Ok(FriendStatus::AlreadyFriend),
            "NEED_FRIEND_REQUEST" => Ok(FriendStatus::NeedFriendRequest),
            "UNKNOWN" => Ok(FriendStatus::Unknown),
            other => Err(ParseFriendStatusError(other.to_string())),
        }
    }
}

/// Why a classification came out the way it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    InvalidSerial,
    MissingDump,
    TruncatedDump { bytes: u64 },
    Unreadable { error: String },
    ParseFailure { error: String },
    ChatInput { resource_id: String, bounds: Option<Bounds> },
    SendFriendRequest { resource_id: String, bounds: Option<Bounds> },
    LimitedProfile { phrase: String, bounds: Option<Bounds> },
    NoSignal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub status: FriendStatus,
    pub evidence: Evidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dump_path: Option<PathBuf>,
}

impl ClassificationReport {
    fn unknown(evidence: Evidence, dump_path: Option<PathBuf>) -> Self {
        Self { status: FriendStatus::Unknown, evidence, dump_path }
    }
}

/// Classifies dumps using a [`ClassifierConfig`].
#[derive(Debug, Clone, Default)]
pub struct FriendStatusClassifier {
    config: ClassifierConfig,
}

impl FriendStatusClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.config.wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify<L>(&self, device_serial: Option<&str>, locator: &L) -> FriendStatus
    where
        L: DumpLocator + ?Sized,
    {
        self.classify_report(device_serial, locator).status
    }

    /// Locate the device's latest dump (retrying once after the configured
    /// wait) and classify it.
    pub fn classify_report<L>(&self, device_serial: Option<&str>, locator: &L) -> ClassificationReport
    where
        L: DumpLocator + ?Sized,
    {
        let serial = match device_serial {
            Some(serial) if !serial.trim().is_empty() => serial,
            _ => {
                warn!("friend status requested without a device serial");
                return ClassificationReport::unknown(Evidence::InvalidSerial, None);
            }
        };

        let path = locator.latest(serial).or_else(|| {
            std::thread::sleep(self.config.wait());
            locator.latest(serial)
        });
        let Some(path) = path else {
            warn!(device_serial = serial, "no UI dump found");
            return ClassificationReport::unknown(Evidence::MissingDump, None);
        };

        let report = self.classify_path(&path);
        info!(
            device_serial = serial,
            status = %report.status,
            evidence = ?report.evidence,
            "friend status decided"
        );
        report
    }

    /// Classify a specific dump file.
    pub fn classify_path(&self, path: &Path) -> ClassificationReport {
        let dump_path = Some(path.to_path_buf());
        let bytes = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "UI dump vanished");
                return ClassificationReport::unknown(Evidence::MissingDump, dump_path);
            }
        };
        if bytes < self.config.min_dump_bytes {
            warn!(path = %path.display(), bytes, "UI dump too small, treating as truncated");
            return ClassificationReport::unknown(Evidence::TruncatedDump { bytes }, dump_path);
        }

        let xml = match std::fs::read_to_string(path) {
            Ok(xml) => xml,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "UI dump unreadable");
                let evidence = Evidence::Unreadable { error: err.to_string() };
                return ClassificationReport::unknown(evidence, dump_path);
            }
        };

        ClassificationReport { dump_path, ..self.classify_xml(&xml) }
    }

    /// Classify raw dump XML. No size threshold applies.
    pub fn classify_xml(&self, xml: &str) -> ClassificationReport {
        match UiDump::parse(xml) {
            Ok(dump) => self.classify_dump(&dump),
            Err(err) => {
                warn!(error = %err, "UI dump XML is corrupt");
                ClassificationReport::unknown(Evidence::ParseFailure { error: err.to_string() }, None)
            }
        }
    }

    /// Apply the signal checks, in priority order, to a parsed dump.
    pub fn classify_dump(&self, dump: &UiDump) -> ClassificationReport {
        let config = &self.config;
        let phrases = config.limited_profile_phrases.as_slice();
        let (status, evidence) = if let Some(el) = dump.find_by_resource_id(&config.chat_input_marker)
        {
            let evidence =
                Evidence::ChatInput { resource_id: el.resource_id.clone(), bounds: el.bounds };
            (FriendStatus::AlreadyFriend, evidence)
        } else if let Some(el) = dump.find_by_resource_id(&config.send_request_marker) {
            let evidence = Evidence::SendFriendRequest {
                resource_id: el.resource_id.clone(),
                bounds: el.bounds,
            };
            (FriendStatus::NeedFriendRequest, evidence)
        } else if let Some((el, phrase)) = dump.find_by_text(phrases) {
            let evidence =
                Evidence::LimitedProfile { phrase: phrase.to_string(), bounds: el.bounds };
            (FriendStatus::NeedFriendRequest, evidence)
        } else {
            (config.fallback.status(), Evidence::NoSignal)
        };
        ClassificationReport { status, evidence, dump_path: None }
    }
}

/// Classify with the default configuration (1.5 s retry wait, `UNKNOWN` fallback).
pub fn classify<L>(device_serial: Option<&str>, locator: &L) -> FriendStatus
where
    L: DumpLocator + ?Sized,
{
    FriendStatusClassifier::default().classify(device_serial, locator)
}
