// SPDX-License-Identifier: MPL-2.0

//! Errors raised while parsing range expressions.

use thiserror::Error;

use crate::version::VersionParseError;

/// Errors that may occur while parsing a range set.
#[derive(Error, Debug, PartialEq)]
pub enum RangeParseError {
    /// An operator was not followed by any version.
    #[error("operator '{operator}' in '{range}' is missing its version")]
    DanglingOperator {
        /// Range that was being parsed.
        range: String,
        /// The lone operator.
        operator: String,
    },

    /// A comparator could not be read as a (partial) version.
    #[error("cannot parse comparator '{comparator}' in '{range}'")]
    InvalidComparator {
        /// Range that was being parsed.
        range: String,
        /// The comparator text.
        comparator: String,
    },

    /// A full version inside a comparator was malformed.
    #[error("invalid version in '{range}': {source}")]
    Version {
        /// Range that was being parsed.
        range: String,
        /// Underlying version error.
        source: VersionParseError,
    },

    /// A hyphen range needs exactly one version on each side.
    #[error("malformed hyphen range '{range}'")]
    Hyphen {
        /// Range that was being parsed.
        range: String,
    },
}
