// SPDX-License-Identifier: MPL-2.0

//! Semantic versions and their precedence.
//!
//! A [SemanticVersion] is `major.minor.patch` with an optional list of
//! pre-release identifiers. Build metadata is accepted while parsing
//! but dropped, it never takes part in comparisons nor in the canonical
//! string form.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Largest integer exactly representable in an IEEE-754 double.
///
/// Every component of the [latest](SemanticVersion::latest) version is set to it.
/// Hosts with other integer guarantees may pick any other value
/// as long as it stays above all versions they expect to see.
pub const LATEST_COMPONENT: u64 = 9_007_199_254_740_991;

/// A single dot-separated pre-release identifier.
///
/// Numeric identifiers always have lower precedence than alphanumeric ones,
/// which the variant order encodes.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Identifier {
    /// Identifier made only of digits, compared numerically.
    Numeric(u64),
    /// Any other identifier, compared lexically in ASCII order.
    AlphaNumeric(String),
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Type for semantic versions: major.minor.patch(-pre).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Vec<Identifier>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for SemanticVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{}", self))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SemanticVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Error creating [SemanticVersion] from [String].
#[derive(Error, Debug, PartialEq)]
pub enum VersionParseError {
    /// [SemanticVersion] must contain major, minor, patch versions.
    #[error("version {full_version} must contain 3 numbers separated by dot")]
    NotThreeParts {
        /// [SemanticVersion] that was being parsed.
        full_version: String,
    },
    /// A numeric part is not a valid number.
    #[error("cannot parse '{version_part}' in '{full_version}' as u64: {parse_error}")]
    ParseIntError {
        /// [SemanticVersion] that was being parsed.
        full_version: String,
        /// A version part where parsing failed.
        version_part: String,
        /// A specific error resulted from parsing a part of the version as [u64].
        parse_error: String,
    },
    /// Numeric parts and numeric pre-release identifiers may not start with 0.
    #[error("'{version_part}' in '{full_version}' has a leading zero")]
    LeadingZero {
        /// [SemanticVersion] that was being parsed.
        full_version: String,
        /// The offending part.
        version_part: String,
    },
    /// Pre-release or build identifiers must be non-empty `[0-9A-Za-z-]+`.
    #[error("invalid identifier '{identifier}' in '{full_version}'")]
    InvalidIdentifier {
        /// [SemanticVersion] that was being parsed.
        full_version: String,
        /// The offending identifier.
        identifier: String,
    },
}

/// Parse one numeric version part, rejecting leading zeros.
pub(crate) fn parse_number(full_version: &str, part: &str) -> Result<u64, VersionParseError> {
    if part.len() > 1 && part.starts_with('0') && part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionParseError::LeadingZero {
            full_version: full_version.to_string(),
            version_part: part.to_string(),
        });
    }
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionParseError::ParseIntError {
            full_version: full_version.to_string(),
            version_part: part.to_string(),
            parse_error: "invalid digit found in string".to_string(),
        });
    }
    part.parse::<u64>().map_err(|e| VersionParseError::ParseIntError {
        full_version: full_version.to_string(),
        version_part: part.to_string(),
        parse_error: e.to_string(),
    })
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Parse the dot-separated pre-release part (without its leading `-`).
pub(crate) fn parse_pre_release(
    full_version: &str,
    pre: &str,
) -> Result<Vec<Identifier>, VersionParseError> {
    pre.split('.')
        .map(|ident| {
            if !is_identifier(ident) {
                return Err(VersionParseError::InvalidIdentifier {
                    full_version: full_version.to_string(),
                    identifier: ident.to_string(),
                });
            }
            if ident.bytes().all(|b| b.is_ascii_digit()) {
                parse_number(full_version, ident).map(Identifier::Numeric)
            } else {
                Ok(Identifier::AlphaNumeric(ident.to_string()))
            }
        })
        .collect()
}

/// Check build metadata (without its leading `+`), which is then discarded.
pub(crate) fn check_build(full_version: &str, build: &str) -> Result<(), VersionParseError> {
    match build.split('.').find(|ident| !is_identifier(ident)) {
        Some(ident) => Err(VersionParseError::InvalidIdentifier {
            full_version: full_version.to_string(),
            identifier: ident.to_string(),
        }),
        None => Ok(()),
    }
}

/// Split `core-pre+build` into its three pieces.
pub(crate) fn split_suffixes(s: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, build) = match s.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (s, None),
    };
    match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre), build),
        None => (rest, None, build),
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let (core, pre, build) = split_suffixes(trimmed);

        let mut parts = core.split('.');
        let (major, minor, patch) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(major), Some(minor), Some(patch), None) => (
                parse_number(s, major)?,
                parse_number(s, minor)?,
                parse_number(s, patch)?,
            ),
            _ => {
                return Err(Self::Err::NotThreeParts {
                    full_version: s.to_string(),
                })
            }
        };
        let pre = match pre {
            Some(pre) => parse_pre_release(s, pre)?,
            None => Vec::new(),
        };
        if let Some(build) = build {
            check_build(s, build)?;
        }
        Ok(Self {
            major,
            minor,
            patch,
            pre,
        })
    }
}

// Constructors
impl SemanticVersion {
    /// Create a version with "major", "minor" and "patch" values.
    /// `version = major.minor.patch`
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: Vec::new(),
        }
    }

    /// Create a pre-release version.
    pub fn with_pre(major: u64, minor: u64, patch: u64, pre: Vec<Identifier>) -> Self {
        Self {
            major,
            minor,
            patch,
            pre,
        }
    }

    /// Version 0.0.0.
    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// Highest version the resolver reasons about, stands for `latest`.
    pub fn latest() -> Self {
        Self::new(LATEST_COMPONENT, LATEST_COMPONENT, LATEST_COMPONENT)
    }
}

// Accessors
impl SemanticVersion {
    /// Whether this version carries pre-release identifiers.
    pub fn is_pre_release(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Whether both versions share `major.minor.patch`.
    pub fn same_release(&self, other: &Self) -> bool {
        (self.major, self.minor, self.patch) == (other.major, other.minor, other.patch)
    }
}

// Convert a tuple (major, minor, patch) into a version.
impl From<(u64, u64, u64)> for SemanticVersion {
    fn from(tuple: (u64, u64, u64)) -> Self {
        let (major, minor, patch) = tuple;
        Self::new(major, minor, patch)
    }
}

// Bump versions.
impl SemanticVersion {
    /// Next patch-level version.
    ///
    /// A pre-release bumps to its own release (`1.2.3-beta` to `1.2.3`),
    /// a release increments the patch number.
    pub fn bump_patch(&self) -> Self {
        if self.is_pre_release() {
            Self::new(self.major, self.minor, self.patch)
        } else {
            Self::new(self.major, self.minor, self.patch.saturating_add(1))
        }
    }

    /// Lowest version above a pre-release, `1.2.3-beta` to `1.2.3-beta.0`.
    ///
    /// [None] for a release, whose successors are pre-releases
    /// of the next patch.
    pub fn next_pre_release(&self) -> Option<Self> {
        if !self.is_pre_release() {
            return None;
        }
        let mut pre = self.pre.clone();
        pre.push(Identifier::Numeric(0));
        Some(Self::with_pre(self.major, self.minor, self.patch, pre))
    }

    /// Lowest pre-release of the same `major.minor.patch`, `1.2.3-0`.
    pub fn first_pre_release(&self) -> Self {
        Self::with_pre(self.major, self.minor, self.patch, vec![Identifier::Numeric(0)])
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (self.pre.is_empty(), other.pre.is_empty()) {
                // A release has higher precedence than any of its pre-releases.
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        for (i, ident) in self.pre.iter().enumerate() {
            f.write_str(if i == 0 { "-" } else { "." })?;
            write!(f, "{}", ident)?;
        }
        Ok(())
    }
}

// TESTS #######################################################################
