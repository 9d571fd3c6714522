// SPDX-License-Identifier: MPL-2.0

//! Outcome of intersecting one conjunction,
//! and the failure records handed to observers.

use std::fmt;

use thiserror::Error;

/// Stage at which a range was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FailureKind {
    /// The range does not parse.
    Valid,
    /// An exact version does not satisfy the other constraints.
    Exact,
    /// No version at or just above the lower bound satisfies the range.
    Min,
    /// The upper bound does not satisfy the range.
    Max,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "valid",
            Self::Exact => "exact",
            Self::Min => "min",
            Self::Max => "max",
        })
    }
}

/// A range that was dropped, and why.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} check failed for {range:?}{}", probe_suffix(.version))]
pub struct Failure {
    /// The range under test; for bound failures, the folded conjunction.
    pub range: String,
    /// Which check failed.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: FailureKind,
    /// Version used to probe the range, if any.
    pub version: Option<String>,
}

fn probe_suffix(version: &Option<String>) -> String {
    match version {
        Some(v) => format!(" (probed with {})", v),
        None => String::new(),
    }
}

impl Failure {
    /// A range that the comparator rejected outright.
    pub fn invalid(range: impl Into<String>) -> Self {
        Self {
            range: range.into(),
            kind: FailureKind::Valid,
            version: None,
        }
    }
}

/// Result of intersecting a single conjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The minimal range equivalent to the conjunction.
    Resolved(String),
    /// No version satisfies the conjunction.
    Infeasible(Failure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages() {
        assert_eq!(
            Failure::invalid("foo").to_string(),
            "valid check failed for \"foo\""
        );
        let failure = Failure {
            range: ">2.0.0 <1.0.0".into(),
            kind: FailureKind::Min,
            version: Some("2.0.1".into()),
        };
        assert_eq!(
            failure.to_string(),
            "min check failed for \">2.0.0 <1.0.0\" (probed with 2.0.1)"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn failure_record_shape() {
        let record = serde_json::to_value(Failure::invalid("x")).unwrap();
        assert_eq!(
            record,
            serde_json::json!({"range": "x", "type": "valid", "version": null})
        );
        let failure = Failure {
            range: ">2.0.0 <1.0.0".into(),
            kind: FailureKind::Min,
            version: Some("2.0.1".into()),
        };
        let text = serde_json::to_string(&failure).unwrap();
        assert_eq!(
            text,
            r#"{"range":">2.0.0 <1.0.0","type":"min","version":"2.0.1"}"#
        );
        assert_eq!(serde_json::from_str::<Failure>(&text).unwrap(), failure);
    }
}
