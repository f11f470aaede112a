//! Navigation paths as ordered segment sequences.
//!
//! Paths are compared segment by segment, never as raw strings: `/students2`
//! is not under `/students`.

use core::str::FromStr;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Bytes escaped when rendering a segment, so the rendering parses back unchanged.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A normalized navigation path.
///
/// Parsing is total: query strings and fragments are dropped, each segment is
/// percent-decoded, empty and `.` segments are ignored, `..` removes the
/// previous segment (never climbing above the root), and the empty string is
/// the root. An encoded `/` inside a segment separates segments like a literal
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutePath {
    segments: Vec<String>,
}

impl RoutePath {
    /// The application root (`/`).
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Self {
        let end = raw.find(['?', '#']).unwrap_or(raw.len());
        let mut segments: Vec<String> = Vec::new();
        for encoded in raw[..end].split('/') {
            let decoded = percent_decode_str(encoded).decode_utf8_lossy();
            for segment in decoded.split('/') {
                match segment {
                    "" | "." => {}
                    ".." => {
                        segments.pop();
                    }
                    other => segments.push(other.to_owned()),
                }
            }
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment-exact prefix test. Every path starts with the root.
    pub fn starts_with(&self, prefix: &RoutePath) -> bool {
        prefix.depth() <= self.depth()
            && self
                .segments
                .iter()
                .zip(prefix.segments.iter())
                .all(|(a, b)| a == b)
    }
}

impl core::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", utf8_percent_encode(segment, SEGMENT))?;
        }
        Ok(())
    }
}

impl From<&str> for RoutePath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl FromStr for RoutePath {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for RoutePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoutePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
