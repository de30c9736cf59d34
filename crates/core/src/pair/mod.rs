//! Canonical, order-independent identifiers for device pairs.
//!
//! `derive(a, b)` is the storage key the persistence layer uses for a pairing
//! record. It must be stable: deriving it again from the same two identifiers,
//! in either order, reproduces the same key.
//!
//! Tokens are ordered as strings, so tokens of different lengths sort
//! lexicographically (`"10" < "9"`). Existing stored keys depend on that
//! ordering; [`TokenOrder::Numeric`] is available for callers that need the
//! numerically sorted form.

pub mod token;

use std::cmp::Ordering;
use std::fmt;

use chrono::Utc;
use md5::{Digest, Md5};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use token::{
    extraction_rules, hash_token, numeric_token, DeviceId, ExtractionRule, MAX_TOKEN_DIGITS,
};

/// Prefix shared by every pair id.
pub const PAIR_PREFIX: &str = "pair_";

/// Prefix of placeholder ids handed out before a pair is finalized.
pub const TEMP_PAIR_PREFIX: &str = "pair_temp_";

const TEMP_SUFFIX_LEN: usize = 8;
const TEMP_SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairIdError {
    #[error("Invalid pair ID format: {0}")]
    InvalidFormat(String),
}

/// A derived `pair_<a>_<b>` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode this id; see [`extract_ids`].
    pub fn ids(&self) -> Result<(i64, i64), PairIdError> {
        extract_ids(&self.0)
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PairId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for PairId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How the two extracted tokens are ordered inside the pair id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenOrder {
    /// String comparison; the form every stored key uses.
    #[default]
    Lexicographic,
    /// Integer comparison, falling back to string comparison on ties or
    /// tokens that do not fit an `i64`.
    Numeric,
}

impl TokenOrder {
    fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            TokenOrder::Lexicographic => a.cmp(b),
            TokenOrder::Numeric => match (a.parse::<i64>(), b.parse::<i64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
                _ => a.cmp(b),
            },
        }
    }
}

/// Derive the canonical pair id for two devices, in either order.
pub fn derive(a: impl Into<DeviceId>, b: impl Into<DeviceId>) -> PairId {
    derive_with(a, b, TokenOrder::Lexicographic)
}

/// [`derive`] with an explicit token ordering.
pub fn derive_with(a: impl Into<DeviceId>, b: impl Into<DeviceId>, order: TokenOrder) -> PairId {
    let first = numeric_token(&a.into());
    let second = numeric_token(&b.into());
    let (low, high) = match order.compare(&first, &second) {
        Ordering::Greater => (second, first),
        _ => (first, second),
    };
    PairId(format!("{PAIR_PREFIX}{low}_{high}"))
}

/// Parse `pair_<a>_<b>` back into `(min, max)`.
///
/// Extra `_`-delimited segments after the first two are ignored.
pub fn extract_ids(pair_id: &str) -> Result<(i64, i64), PairIdError> {
    let (first, second) = raw_components(pair_id)?;
    Ok((first.min(second), first.max(second)))
}

/// True when `pair_id` decodes and its components already appear in
/// non-decreasing numeric order.
pub fn is_valid(pair_id: &str) -> bool {
    matches!(raw_components(pair_id), Ok((first, second)) if first <= second)
}

fn raw_components(pair_id: &str) -> Result<(i64, i64), PairIdError> {
    let invalid = || PairIdError::InvalidFormat(pair_id.to_string());
    let rest = pair_id.strip_prefix(PAIR_PREFIX).ok_or_else(invalid)?;
    let mut parts = rest.split('_');
    let first = parts.next().and_then(|p| p.parse::<i64>().ok()).ok_or_else(invalid)?;
    let second = parts.next().and_then(|p| p.parse::<i64>().ok()).ok_or_else(invalid)?;
    Ok((first, second))
}

/// Placeholder id of the form `pair_temp_<unix seconds>_<8 chars [a-z0-9]>`.
pub fn generate_temp_pair_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TEMP_SUFFIX_LEN)
        .map(|_| TEMP_SUFFIX_CHARSET[rng.gen_range(0..TEMP_SUFFIX_CHARSET.len())] as char)
        .collect();
    format!("{TEMP_PAIR_PREFIX}{}_{suffix}", Utc::now().timestamp())
}

/// Order-independent MD5 key used by pair rows written before standardized
/// pair ids existed: the two raw identifiers sorted, joined with `_`.
pub fn legacy_pair_hash(a: impl Into<DeviceId>, b: impl Into<DeviceId>) -> String {
    let mut devices = [a.into().to_string(), b.into().to_string()];
    devices.sort();
    let digest = Md5::digest(devices.join("_").as_bytes());
    format!("{:x}", digest)
}
