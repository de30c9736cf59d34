use std::path::Path;

use anyhow::{anyhow, Result};
use devpair_core::dump::{Bounds, DirDumpLocator};
use devpair_core::{ClassificationReport, ClassifierConfig, Evidence, FriendStatusClassifier};

/// One-line human description of why a status was chosen.
pub fn describe_evidence(evidence: &Evidence) -> String {
    let at = |bounds: Option<Bounds>| match bounds {
        Some(b) => {
            let (x, y) = b.center();
            format!(" at {b} (tap {x},{y})")
        }
        None => String::new(),
    };
    match evidence {
        Evidence::InvalidSerial => "no device serial given".to_string(),
        Evidence::MissingDump => "no UI dump found for device".to_string(),
        Evidence::TruncatedDump { bytes } => format!("UI dump too small ({bytes} bytes)"),
        Evidence::Unreadable { error } => format!("UI dump unreadable: {error}"),
        Evidence::ParseFailure { error } => format!("UI dump is not valid XML: {error}"),
        Evidence::ChatInput { resource_id, bounds } => {
            format!("chat input {resource_id}{}", at(*bounds))
        }
        Evidence::SendFriendRequest { resource_id, bounds } => {
            format!("friend request button {resource_id}{}", at(*bounds))
        }
        Evidence::LimitedProfile { phrase, bounds } => {
            format!("limited profile text \"{phrase}\"{}", at(*bounds))
        }
        Evidence::NoSignal => "no friend-status signal on screen".to_string(),
    }
}

fn print_report(report: &ClassificationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("Status: {}", report.status);
    println!("Reason: {}", describe_evidence(&report.evidence));
    if let Some(path) = &report.dump_path {
        println!("Dump: {}", path.display());
    }
    Ok(())
}

/// Classify the latest dump captured for `serial` under `dump_dir`.
pub fn friend_status_command(
    serial: &str,
    dump_dir: &Path,
    config: ClassifierConfig,
    json: bool,
) -> Result<()> {
    let classifier = FriendStatusClassifier::new(config);
    let locator = DirDumpLocator::new(dump_dir);
    let report = classifier.classify_report(Some(serial), &locator);
    print_report(&report, json)
}

/// Classify one specific dump file.
pub fn inspect_dump_command(file: &Path, config: ClassifierConfig, json: bool) -> Result<()> {
    if !file.exists() {
        return Err(anyhow!("Dump file does not exist: {}", file.display()));
    }
    let report = FriendStatusClassifier::new(config).classify_path(file);
    print_report(&report, json)
}
