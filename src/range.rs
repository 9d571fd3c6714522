// SPDX-License-Identifier: MPL-2.0

//! Ranges are constraints defining sets of versions.
//!
//! A [RangeSet] is a disjunction (`||`) of [ComparatorSet]s,
//! each of them a conjunction (whitespace) of primitive [Comparator]s.
//!
//! Parsing desugars every shorthand into primitive comparators:
//!  - x-ranges and partial versions: `1.x` becomes `>=1.0.0 <2.0.0`,
//!    `1.2` becomes `>=1.2.0 <1.3.0` and `*` becomes `>=0.0.0`
//!  - tilde: `~1.2.3` becomes `>=1.2.3 <1.3.0`
//!  - caret: `^0.2.3` becomes `>=0.2.3 <0.3.0`
//!  - hyphen: `1.2 - 2.3.4` becomes `>=1.2.0 <=2.3.4`
//!  - operators on partials: `>1.2` becomes `>=1.3.0`, `<=1` becomes `<2.0.0`
//!
//! The [Display] form of a parsed range is its canonical string.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::RangeParseError;
use crate::version::{
    check_build, parse_number, parse_pre_release, split_suffixes, Identifier, SemanticVersion,
};

/// Primitive comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `=`, printed as a bare version.
    Eq,
}

impl Op {
    /// Split a leading operator off a comparator token.
    /// A token without operator is an equality.
    pub fn split_prefix(token: &str) -> (Self, &str) {
        for (prefix, op) in [
            (">=", Self::Gte),
            ("<=", Self::Lte),
            (">", Self::Gt),
            ("<", Self::Lt),
            ("=", Self::Eq),
        ] {
            if let Some(rest) = token.strip_prefix(prefix) {
                return (op, rest);
            }
        }
        (Self::Eq, token)
    }

    /// Canonical spelling, empty for equality.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Eq => "",
        }
    }

    /// `>` or `>=`.
    pub fn is_lower(self) -> bool {
        matches!(self, Self::Gt | Self::Gte)
    }

    /// `<` or `<=`.
    pub fn is_upper(self) -> bool {
        matches!(self, Self::Lt | Self::Lte)
    }

}

impl Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator applied to one full version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparator {
    op: Op,
    version: SemanticVersion,
}

impl Comparator {
    /// Comparator `op version`.
    pub fn new(op: Op, version: SemanticVersion) -> Self {
        Self { op, version }
    }

    /// Whether `v` passes this single comparison.
    pub fn matches(&self, v: &SemanticVersion) -> bool {
        match self.op {
            Op::Gt => v > &self.version,
            Op::Gte => v >= &self.version,
            Op::Lt => v < &self.version,
            Op::Lte => v <= &self.version,
            Op::Eq => v == &self.version,
        }
    }
}

impl Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

/// Conjunction of comparators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparatorSet {
    comparators: Vec<Comparator>,
}

impl ComparatorSet {
    /// The set matching every release, `>=0.0.0`.
    pub fn any() -> Self {
        Self {
            comparators: any(),
        }
    }

    /// Check if the conjunction contains a given version.
    ///
    /// A pre-release is only admitted when one of the comparators
    /// carries a pre-release on the same `major.minor.patch`.
    pub fn contains(&self, v: &SemanticVersion) -> bool {
        if !self.comparators.iter().all(|c| c.matches(v)) {
            return false;
        }
        !v.is_pre_release()
            || self
                .comparators
                .iter()
                .any(|c| c.version.is_pre_release() && c.version.same_release(v))
    }
}

impl Display for ComparatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.comparators.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Disjunction of comparator sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeSet {
    sets: Vec<ComparatorSet>,
}

impl RangeSet {
    /// Check if any alternative contains a given version.
    pub fn contains(&self, v: &SemanticVersion) -> bool {
        self.sets.iter().any(|set| set.contains(v))
    }
}

impl Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, set) in self.sets.iter().enumerate() {
            if i > 0 {
                f.write_str("||")?;
            }
            write!(f, "{}", set)?;
        }
        Ok(())
    }
}

impl FromStr for RangeSet {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sets = s
            .split("||")
            .map(|alternative| parse_conjunction(s, alternative))
            .collect::<Result<_, _>>()?;
        Ok(Self { sets })
    }
}

// PARSING #####################################################################

/// A possibly incomplete version, `None` parts are wildcards or missing.
#[derive(Debug, Clone, PartialEq)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Vec<Identifier>,
}

impl Partial {
    fn full(&self, major: u64, minor: u64, patch: u64) -> SemanticVersion {
        SemanticVersion::with_pre(major, minor, patch, self.pre.clone())
    }
}

fn any() -> Vec<Comparator> {
    vec![Comparator::new(Op::Gte, SemanticVersion::zero())]
}

fn none() -> Vec<Comparator> {
    vec![Comparator::new(Op::Lt, SemanticVersion::zero())]
}

fn gte(major: u64, minor: u64, patch: u64) -> Comparator {
    Comparator::new(Op::Gte, SemanticVersion::new(major, minor, patch))
}

fn lt(major: u64, minor: u64, patch: u64) -> Comparator {
    Comparator::new(Op::Lt, SemanticVersion::new(major, minor, patch))
}

fn is_operator_only(token: &str) -> bool {
    token.bytes().all(|b| matches!(b, b'<' | b'>' | b'=' | b'~' | b'^'))
}

fn parse_conjunction(range: &str, text: &str) -> Result<ComparatorSet, RangeParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(ComparatorSet::any());
    }

    if tokens.contains(&"-") {
        return match tokens.as_slice() {
            [from, "-", to] => Ok(ComparatorSet {
                comparators: hyphen(
                    parse_partial(range, from)?,
                    parse_partial(range, to)?,
                ),
            }),
            _ => Err(RangeParseError::Hyphen {
                range: range.to_string(),
            }),
        };
    }

    let mut comparators = Vec::new();
    let mut pending: Option<&str> = None;
    for token in tokens {
        // `>= 1.2.3` is read as `>=1.2.3`.
        if is_operator_only(token) && pending.is_none() {
            pending = Some(token);
            continue;
        }
        let joined;
        let token = match pending.take() {
            Some(op) => {
                joined = format!("{}{}", op, token);
                joined.as_str()
            }
            None => token,
        };
        comparators.extend(parse_comparator(range, token)?);
    }
    if let Some(operator) = pending {
        return Err(RangeParseError::DanglingOperator {
            range: range.to_string(),
            operator: operator.to_string(),
        });
    }
    Ok(ComparatorSet { comparators })
}

fn parse_comparator(range: &str, token: &str) -> Result<Vec<Comparator>, RangeParseError> {
    if let Some(rest) = token.strip_prefix("~>").or_else(|| token.strip_prefix('~')) {
        return Ok(tilde(parse_partial(range, rest)?));
    }
    if let Some(rest) = token.strip_prefix('^') {
        return Ok(caret(parse_partial(range, rest)?));
    }
    let (op, rest) = Op::split_prefix(token);
    Ok(primitive(op, parse_partial(range, rest)?))
}

fn parse_partial(range: &str, text: &str) -> Result<Partial, RangeParseError> {
    let invalid = || RangeParseError::InvalidComparator {
        range: range.to_string(),
        comparator: text.to_string(),
    };
    let stripped = text.strip_prefix('v').unwrap_or(text);
    if stripped.is_empty() {
        return Err(invalid());
    }
    let (core, pre, build) = split_suffixes(stripped);

    let mut numbers = [None; 3];
    let mut parts = core.split('.');
    let mut wildcard = false;
    for slot in numbers.iter_mut() {
        match parts.next() {
            Some("x" | "X" | "*") => wildcard = true,
            Some(part) => {
                let n = parse_number(text, part).map_err(|_| invalid())?;
                // Anything after a wildcard is a wildcard too.
                if !wildcard {
                    *slot = Some(n);
                }
            }
            None => wildcard = true,
        }
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    let complete = numbers.iter().all(Option::is_some);
    if (pre.is_some() || build.is_some()) && !complete {
        return Err(invalid());
    }
    let pre = match pre {
        Some(pre) => parse_pre_release(text, pre).map_err(|source| RangeParseError::Version {
            range: range.to_string(),
            source,
        })?,
        None => Vec::new(),
    };
    if let Some(build) = build {
        check_build(text, build).map_err(|source| RangeParseError::Version {
            range: range.to_string(),
            source,
        })?;
    }

    let [major, minor, patch] = numbers;
    Ok(Partial {
        major,
        minor,
        patch,
        pre,
    })
}

// DESUGARING ##################################################################

fn primitive(op: Op, p: Partial) -> Vec<Comparator> {
    match (p.major, p.minor, p.patch) {
        (None, _, _) => match op {
            Op::Gt | Op::Lt => none(),
            _ => any(),
        },
        (Some(major), None, _) => match op {
            Op::Eq => vec![gte(major, 0, 0), lt(major.saturating_add(1), 0, 0)],
            Op::Gt => vec![gte(major.saturating_add(1), 0, 0)],
            Op::Gte => vec![gte(major, 0, 0)],
            Op::Lt => vec![lt(major, 0, 0)],
            Op::Lte => vec![lt(major.saturating_add(1), 0, 0)],
        },
        (Some(major), Some(minor), None) => match op {
            Op::Eq => vec![gte(major, minor, 0), lt(major, minor.saturating_add(1), 0)],
            Op::Gt => vec![gte(major, minor.saturating_add(1), 0)],
            Op::Gte => vec![gte(major, minor, 0)],
            Op::Lt => vec![lt(major, minor, 0)],
            Op::Lte => vec![lt(major, minor.saturating_add(1), 0)],
        },
        (Some(major), Some(minor), Some(patch)) => {
            vec![Comparator::new(op, p.full(major, minor, patch))]
        }
    }
}

fn tilde(p: Partial) -> Vec<Comparator> {
    match (p.major, p.minor, p.patch) {
        (None, _, _) => any(),
        (Some(major), None, _) => vec![gte(major, 0, 0), lt(major.saturating_add(1), 0, 0)],
        (Some(major), Some(minor), None) => {
            vec![gte(major, minor, 0), lt(major, minor.saturating_add(1), 0)]
        }
        (Some(major), Some(minor), Some(patch)) => vec![
            Comparator::new(Op::Gte, p.full(major, minor, patch)),
            lt(major, minor.saturating_add(1), 0),
        ],
    }
}

fn caret(p: Partial) -> Vec<Comparator> {
    match (p.major, p.minor, p.patch) {
        (None, _, _) => any(),
        (Some(major), None, _) => vec![gte(major, 0, 0), lt(major.saturating_add(1), 0, 0)],
        (Some(0), Some(minor), None) => vec![gte(0, minor, 0), lt(0, minor.saturating_add(1), 0)],
        (Some(major), Some(minor), None) => {
            vec![gte(major, minor, 0), lt(major.saturating_add(1), 0, 0)]
        }
        (Some(major), Some(minor), Some(patch)) => {
            let upper = match (major, minor) {
                (0, 0) => lt(0, 0, patch.saturating_add(1)),
                (0, _) => lt(0, minor.saturating_add(1), 0),
                _ => lt(major.saturating_add(1), 0, 0),
            };
            vec![Comparator::new(Op::Gte, p.full(major, minor, patch)), upper]
        }
    }
}

fn hyphen(from: Partial, to: Partial) -> Vec<Comparator> {
    let mut comparators = Vec::with_capacity(2);
    match (from.major, from.minor, from.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => comparators.push(gte(major, 0, 0)),
        (Some(major), Some(minor), None) => comparators.push(gte(major, minor, 0)),
        (Some(major), Some(minor), Some(patch)) => {
            comparators.push(Comparator::new(Op::Gte, from.full(major, minor, patch)))
        }
    }
    match (to.major, to.minor, to.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => comparators.push(lt(major.saturating_add(1), 0, 0)),
        (Some(major), Some(minor), None) => {
            comparators.push(lt(major, minor.saturating_add(1), 0))
        }
        (Some(major), Some(minor), Some(patch)) => {
            comparators.push(Comparator::new(Op::Lte, to.full(major, minor, patch)))
        }
    }
    if comparators.is_empty() {
        any()
    } else {
        comparators
    }
}

// TESTS #######################################################################

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::version::tests::{release_strategy, strategy as version_strategy};
    use proptest::prelude::*;

    fn canonical(range: &str) -> String {
        range.parse::<RangeSet>().unwrap().to_string()
    }

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    /// Ranges built from the shorthand forms, over small version numbers.
    pub fn strategy() -> impl Strategy<Value = String> {
        let number = 0u64..4;
        let simple = prop_oneof![
            (
                prop::sample::select(vec![">", ">=", "<", "<=", "=", "", "^", "~"]),
                release_strategy()
            )
                .prop_map(|(op, v)| format!("{}{}", op, v)),
            (number.clone(), prop::sample::select(vec!["x", "*"]))
                .prop_map(|(major, x)| format!("{}.{}", major, x)),
            (number.clone(), number).prop_map(|(major, minor)| format!("^{}.{}", major, minor)),
            Just("*".to_string()),
        ];
        prop::collection::vec(simple, 1..3).prop_map(|parts| parts.join(" "))
    }

    #[test]
    fn x_ranges() {
        assert_eq!(canonical("*"), ">=0.0.0");
        assert_eq!(canonical(""), ">=0.0.0");
        assert_eq!(canonical("x"), ">=0.0.0");
        assert_eq!(canonical("1.x"), ">=1.0.0 <2.0.0");
        assert_eq!(canonical("1"), ">=1.0.0 <2.0.0");
        assert_eq!(canonical("1.2.*"), ">=1.2.0 <1.3.0");
        assert_eq!(canonical("1.2"), ">=1.2.0 <1.3.0");
        assert_eq!(canonical("1.x.3"), ">=1.0.0 <2.0.0");
    }

    #[test]
    fn operators_on_partials() {
        assert_eq!(canonical(">1"), ">=2.0.0");
        assert_eq!(canonical(">1.2"), ">=1.3.0");
        assert_eq!(canonical(">=1.2"), ">=1.2.0");
        assert_eq!(canonical("<1.2"), "<1.2.0");
        assert_eq!(canonical("<=1"), "<2.0.0");
        assert_eq!(canonical("=1.2"), ">=1.2.0 <1.3.0");
        assert_eq!(canonical(">*"), "<0.0.0");
        assert_eq!(canonical(">=*"), ">=0.0.0");
    }

    #[test]
    fn exact_versions_print_bare() {
        assert_eq!(canonical("=1.2.3"), "1.2.3");
        assert_eq!(canonical("v1.2.3"), "1.2.3");
        assert_eq!(canonical("1.2.3+build"), "1.2.3");
    }

    #[test]
    fn tilde_and_caret() {
        assert_eq!(canonical("~1.2.3"), ">=1.2.3 <1.3.0");
        assert_eq!(canonical("~>1.2"), ">=1.2.0 <1.3.0");
        assert_eq!(canonical("~1"), ">=1.0.0 <2.0.0");
        assert_eq!(canonical("~1.2.3-beta.2"), ">=1.2.3-beta.2 <1.3.0");
        assert_eq!(canonical("^1.2.3"), ">=1.2.3 <2.0.0");
        assert_eq!(canonical("^0.2.3"), ">=0.2.3 <0.3.0");
        assert_eq!(canonical("^0.0.3"), ">=0.0.3 <0.0.4");
        assert_eq!(canonical("^1.2.x"), ">=1.2.0 <2.0.0");
        assert_eq!(canonical("^0.0.x"), ">=0.0.0 <0.1.0");
        assert_eq!(canonical("^0.x"), ">=0.0.0 <1.0.0");
    }

    #[test]
    fn hyphen_ranges() {
        assert_eq!(canonical("1.2.3 - 2.3.4"), ">=1.2.3 <=2.3.4");
        assert_eq!(canonical("1.2 - 2.3.4"), ">=1.2.0 <=2.3.4");
        assert_eq!(canonical("1.2.3 - 2.3"), ">=1.2.3 <2.4.0");
        assert_eq!(canonical("1.2.3 - 2"), ">=1.2.3 <3.0.0");
        assert_eq!(canonical("* - *"), ">=0.0.0");
    }

    #[test]
    fn spaced_operators_and_alternatives() {
        assert_eq!(canonical(">= 1.2.3 < 2"), ">=1.2.3 <2.0.0");
        assert_eq!(canonical("1.x || >=2.5.0"), ">=1.0.0 <2.0.0||>=2.5.0");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            ">=".parse::<RangeSet>(),
            Err(RangeParseError::DanglingOperator { .. })
        ));
        assert!(matches!(
            "1.2.3 - ".parse::<RangeSet>(),
            Err(RangeParseError::Hyphen { .. })
        ));
        assert!(matches!(
            "not-a-version".parse::<RangeSet>(),
            Err(RangeParseError::InvalidComparator { .. })
        ));
        assert!(matches!(
            "1.2.3.4".parse::<RangeSet>(),
            Err(RangeParseError::InvalidComparator { .. })
        ));
        assert!(matches!(
            ">=1.2.3-be$ta".parse::<RangeSet>(),
            Err(RangeParseError::Version { .. })
        ));
        assert!("1.2-beta".parse::<RangeSet>().is_err());
    }

    #[test]
    fn pre_release_admission() {
        let range: RangeSet = ">=1.2.3-alpha <1.3.0".parse().unwrap();
        assert!(range.contains(&v("1.2.3-beta")));
        assert!(range.contains(&v("1.2.5")));
        assert!(!range.contains(&v("1.2.5-beta")));

        let range: RangeSet = ">1.0.0 <=1.0.1".parse().unwrap();
        assert!(range.contains(&v("1.0.1")));
        assert!(!range.contains(&v("1.0.1-alpha")));
    }

    proptest! {
        #[test]
        fn canonical_form_is_stable(range in strategy()) {
            let once = canonical(&range);
            prop_assert_eq!(canonical(&once), once);
        }

        #[test]
        fn canonical_form_has_same_versions(range in strategy(), version in version_strategy()) {
            let parsed: RangeSet = range.parse().unwrap();
            let reparsed: RangeSet = parsed.to_string().parse().unwrap();
            prop_assert_eq!(parsed.contains(&version), reparsed.contains(&version));
        }

        #[test]
        fn contains_exact(version in version_strategy()) {
            let range: RangeSet = format!("={}", version).parse().unwrap();
            prop_assert!(range.contains(&version));
        }
    }
}
