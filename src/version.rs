use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from a tag string (e.g., "v1.2.3" -> Version(1,2,3)).
    ///
    /// One optional leading 'v' is stripped; the remainder must be exactly
    /// three dot-separated integers. Pre-release suffixes, build metadata,
    /// and any other extra content are rejected.
    pub fn parse(tag: &str) -> Result<Self> {
        let bare = tag.strip_prefix('v').unwrap_or(tag);

        let shape = Regex::new(r"^(\d+)\.(\d+)\.(\d+)$")
            .map_err(|_| ReleaseError::version_format("invalid version shape pattern"))?;
        let captures = shape.captures(bare).ok_or_else(|| {
            ReleaseError::version_format(format!(
                "tag '{}' does not match [v]MAJOR.MINOR.PATCH",
                tag
            ))
        })?;

        let major = parse_component(&captures[1], "major")?;
        let minor = parse_component(&captures[2], "minor")?;
        let patch = parse_component(&captures[3], "patch")?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Next minor version: minor incremented, patch reset, major unchanged
    pub fn next_minor(&self) -> Self {
        Version {
            major: self.major,
            minor: self.minor + 1,
            patch: 0,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn parse_component(text: &str, label: &str) -> Result<u32> {
    text.parse::<u32>()
        .map_err(|_| ReleaseError::version_format(format!("invalid {} version: {}", label, text)))
}

/// A release tag, always rendered in the canonical `v`-prefixed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub version: Version,
}

impl ReleaseTag {
    /// Create a release tag for a version
    pub fn new(version: Version) -> Self {
        ReleaseTag { version }
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Number(u64),
    Text(&'a str),
}

fn tag_runs(name: &str) -> Vec<Run<'_>> {
    let bytes = name.as_bytes();
    let mut runs = Vec::new();
    let mut index = 0;
    while index < bytes.len() {
        let start = index;
        if bytes[index].is_ascii_digit() {
            while index < bytes.len() && bytes[index].is_ascii_digit() {
                index += 1;
            }
            // Digit runs too long for u64 saturate instead of failing the sort.
            let value = name[start..index].parse::<u64>().unwrap_or(u64::MAX);
            runs.push(Run::Number(value));
        } else {
            while index < bytes.len() && !bytes[index].is_ascii_digit() {
                index += 1;
            }
            runs.push(Run::Text(&name[start..index]));
        }
    }
    runs
}

/// Compare two tag names with version-aware ordering.
///
/// Runs of ASCII digits compare numerically and everything else compares as
/// text, so "v1.10.0" orders above "v1.9.0". At the same position a numeric
/// run orders before a text run; a name that is a prefix of another orders
/// first.
pub fn compare_tag_names(a: &str, b: &str) -> Ordering {
    let left = tag_runs(a);
    let right = tag_runs(b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (Run::Number(x), Run::Number(y)) => x.cmp(y),
            (Run::Text(x), Run::Text(y)) => x.cmp(y),
            (Run::Number(_), Run::Text(_)) => Ordering::Less,
            (Run::Text(_), Run::Number(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len())
}

/// Latest tag name by version-aware ordering, if the list is non-empty
pub fn latest_tag(tags: &[String]) -> Option<&str> {
    tags.iter()
        .map(String::as_str)
        .max_by(|a, b| compare_tag_names(a, b))
}

/// Resolve the next release tag from the full tag list.
///
/// The latest tag must parse strictly as `[v]MAJOR.MINOR.PATCH`; a malformed
/// latest tag is an error rather than a guess. A repository with no tags
/// starts from the 0.0.0 baseline, so its first release is v0.1.0.
pub fn next_release_tag(tags: &[String]) -> Result<ReleaseTag> {
    let current = match latest_tag(tags) {
        Some(latest) => Version::parse(latest)?,
        None => Version::new(0, 0, 0),
    };
    Ok(ReleaseTag::new(current.next_minor()))
}
