//! UI hierarchy dumps (uiautomator XML) and the queries the classifier runs
//! against them.
//!
//! A dump is flattened into a list of [`UiElement`]s in document order. All
//! queries are presence-based: the first element that matches wins.

pub mod locator;

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use locator::{
    dump_file_prefix, is_dump_for, DirDumpLocator, DumpLocator, DEFAULT_DUMP_DIR,
};

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Failed to read UI dump: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse UI dump XML: {0}")]
    Parse(#[from] roxmltree::Error),
}

/// Screen rectangle decoded from a `[x1,y1][x2,y2]` bounds attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Parse `[x1,y1][x2,y2]`; anything else yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^\[(-?\d+),(-?\d+)\]\[(-?\d+),(-?\d+)\]$").expect("bounds pattern compiles")
        });
        let caps = pattern.captures(raw.trim())?;
        let coord = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i32>().ok());
        Some(Self { left: coord(1)?, top: coord(2)?, right: coord(3)?, bottom: coord(4)? })
    }

    /// Tap point at the middle of the rectangle.
    pub fn center(&self) -> (i32, i32) {
        (midpoint(self.left, self.right), midpoint(self.top, self.bottom))
    }
}

/// Midpoint rounded toward zero, widened so extreme coordinates cannot overflow.
fn midpoint(a: i32, b: i32) -> i32 {
    let mid = (i64::from(a) + i64::from(b)) / 2;
    // Lies between `a` and `b`, so it always fits.
    i32::try_from(mid).unwrap_or(a)
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}][{},{}]", self.left, self.top, self.right, self.bottom)
    }
}

/// One element of a dump. Absent attributes are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiElement {
    pub tag: String,
    pub resource_id: String,
    pub text: String,
    pub content_desc: String,
    pub class: String,
    pub bounds: Option<Bounds>,
}

/// Parsed, flattened UI hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiDump {
    elements: Vec<UiElement>,
}

impl UiDump {
    pub fn parse(xml: &str) -> Result<Self, DumpError> {
        let doc = roxmltree::Document::parse(xml)?;
        let elements = doc
            .root_element()
            .descendants()
            .filter(|node| node.is_element())
            .map(|node| {
                let attr = |name: &str| node.attribute(name).unwrap_or_default().to_string();
                UiElement {
                    tag: node.tag_name().name().to_string(),
                    resource_id: attr("resource-id"),
                    text: attr("text"),
                    content_desc: attr("content-desc"),
                    class: attr("class"),
                    bounds: node.attribute("bounds").and_then(Bounds::parse),
                }
            })
            .collect();
        Ok(Self { elements })
    }

    pub fn from_file(path: &Path) -> Result<Self, DumpError> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    pub fn from_elements(elements: Vec<UiElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[UiElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// First element whose resource-id contains `marker`.
    ///
    /// Substring rather than equality: real ids carry a package prefix such as
    /// `com.zing.zalo:id/`.
    pub fn find_by_resource_id(&self, marker: &str) -> Option<&UiElement> {
        if marker.is_empty() {
            return None;
        }
        let found = self.elements.iter().find(|el| el.resource_id.contains(marker));
        if let Some(el) = found {
            debug!(marker, resource_id = %el.resource_id, bounds = ?el.bounds, "resource-id match");
        }
        found
    }

    /// First element whose text contains any of `phrases`, with the phrase hit.
    pub fn find_by_text<'a, S: AsRef<str>>(
        &'a self,
        phrases: &'a [S],
    ) -> Option<(&'a UiElement, &'a str)> {
        let found = self.elements.iter().find_map(|el| {
            phrases
                .iter()
                .map(|phrase| phrase.as_ref())
                .find(|phrase| !phrase.is_empty() && el.text.contains(phrase))
                .map(|phrase| (el, phrase))
        });
        if let Some((el, phrase)) = found {
            debug!(phrase, text = %el.text, bounds = ?el.bounds, "text match");
        }
        found
    }

    /// Bounds of the first element whose resource-id contains `marker`.
    pub fn element_bounds(&self, marker: &str) -> Option<Bounds> {
        self.find_by_resource_id(marker).and_then(|el| el.bounds)
    }
}

pub fn has_resource_id_containing(dump: &UiDump, marker: &str) -> bool {
    dump.find_by_resource_id(marker).is_some()
}

pub fn has_text_containing<S: AsRef<str>>(dump: &UiDump, phrases: &[S]) -> bool {
    dump.find_by_text(phrases).is_some()
}
