//! Numeric token extraction for heterogeneous device identifiers.
//!
//! A device may be named by an `ip:port` address, a bare IP, a synthetic
//! `device_<token>` / `device_<timestamp>_<id>` name, any string with embedded
//! digits, or a raw integer. Each identifier is reduced to a single numeric
//! token by running an ordered list of [`ExtractionRule`]s; the first rule that
//! applies and yields a token wins. Identifiers with no digits at all fall back
//! to a stable FNV-1a hash so extraction never fails.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the hash fallback token.
pub const HASH_TOKEN_RANGE: u32 = 10_000;

/// Minimum length of the middle segment of `device_<timestamp>_<id>` names.
const TIMESTAMP_MIN_DIGITS: usize = 10;

/// Longest digit run accepted as a token. Eighteen digits always fit an `i64`,
/// so every derived pair id decodes again.
pub const MAX_TOKEN_DIGITS: usize = 18;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Opaque identifier naming a device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceId {
    /// A raw integer id.
    Number(i64),
    /// Anything else: `ip:port`, bare IP, synthetic names, serials.
    Name(String),
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceId::Number(n) => write!(f, "{n}"),
            DeviceId::Name(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        DeviceId::Name(value.to_string())
    }
}

impl From<String> for DeviceId {
    fn from(value: String) -> Self {
        DeviceId::Name(value)
    }
}

impl From<&String> for DeviceId {
    fn from(value: &String) -> Self {
        DeviceId::Name(value.clone())
    }
}

macro_rules! device_id_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DeviceId {
                fn from(value: $t) -> Self {
                    DeviceId::Number(i64::from(value))
                }
            }
        )*
    };
}

device_id_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// One step of the extraction chain: a predicate deciding whether the rule
/// applies and an extractor that may still decline (returning `None`), in
/// which case the next rule is tried.
#[derive(Clone, Copy)]
pub struct ExtractionRule {
    name: &'static str,
    applies: fn(&str) -> bool,
    extract: fn(&str) -> Option<String>,
}

impl ExtractionRule {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the rule against `raw`. `None` means "not applicable here".
    pub fn apply(&self, raw: &str) -> Option<String> {
        if (self.applies)(raw) {
            (self.extract)(raw)
        } else {
            None
        }
    }
}

impl fmt::Debug for ExtractionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionRule").field("name", &self.name).finish()
    }
}

const RULES: &[ExtractionRule] = &[
    ExtractionRule { name: "host-port", applies: has_colon, extract: host_last_run },
    ExtractionRule { name: "underscore-suffix", applies: has_underscore, extract: underscore_suffix },
    ExtractionRule { name: "last-digit-run", applies: always, extract: last_digit_run },
];

/// The ordered extraction chain used by [`numeric_token`], hash fallback excluded.
pub fn extraction_rules() -> &'static [ExtractionRule] {
    RULES
}

/// Reduce a device identifier to its representative numeric token.
pub fn numeric_token(device: &DeviceId) -> String {
    match device {
        DeviceId::Number(n) => n.to_string(),
        DeviceId::Name(raw) => RULES
            .iter()
            .find_map(|rule| rule.apply(raw))
            .unwrap_or_else(|| hash_token(raw)),
    }
}

/// Deterministic fallback token: FNV-1a (32 bit) over the UTF-8 bytes,
/// reduced into `0..HASH_TOKEN_RANGE`.
pub fn hash_token(raw: &str) -> String {
    (fnv1a_32(raw.as_bytes()) % HASH_TOKEN_RANGE).to_string()
}

fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME))
}

fn digit_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("[0-9]+").expect("digit-run pattern compiles"))
}

fn is_all_digits(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn is_token(segment: &str) -> bool {
    is_all_digits(segment) && segment.len() <= MAX_TOKEN_DIGITS
}

fn has_colon(raw: &str) -> bool {
    raw.contains(':')
}

fn has_underscore(raw: &str) -> bool {
    raw.contains('_')
}

fn always(_: &str) -> bool {
    true
}

/// Last octet of the host part of `ip:port`; the port is ignored.
fn host_last_run(raw: &str) -> Option<String> {
    let host = raw.split(':').next().unwrap_or_default();
    last_digit_run(host)
}

/// `device_<timestamp>_<id>` yields `<id>`; otherwise a purely numeric last
/// segment is used.
fn underscore_suffix(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.split('_').collect();
    if let [prefix, stamp, id] = parts.as_slice() {
        if *prefix == "device"
            && is_all_digits(stamp)
            && stamp.len() >= TIMESTAMP_MIN_DIGITS
            && is_token(id)
        {
            return Some((*id).to_string());
        }
    }
    parts.last().filter(|last| is_token(last)).map(|last| (*last).to_string())
}

/// Runs longer than [`MAX_TOKEN_DIGITS`] decline rather than overflow on decode.
fn last_digit_run(raw: &str) -> Option<String> {
    digit_run_pattern()
        .find_iter(raw)
        .last()
        .map(|m| m.as_str())
        .filter(|run| run.len() <= MAX_TOKEN_DIGITS)
        .map(str::to_string)
}
