// SPDX-License-Identifier: MPL-2.0

use semver_resolve::report::FailureKind;
use semver_resolve::{resolve, resolve_with};

#[test]
/// Two dependents asking for compatible caret ranges.
fn shared_caret_requirements() {
    assert_eq!(resolve(&["^4.17.0", "^4.17.21"]), ">=4.17.21 <5.0.0");
}

#[test]
/// Pre-1.0 caret ranges only allow minor-compatible updates.
fn zero_major_caret() {
    assert_eq!(resolve(&["^0.4.2", ">=0.4.5"]), ">=0.4.5 <0.5.0");
    assert_eq!(resolve(&["^0.4.2", "^0.5.0"]), "");
}

#[test]
/// A lockfile pin must satisfy every requirement.
fn pinned_version() {
    assert_eq!(resolve(&["~2.3.1", "2.3.4", "<3"]), "2.3.4");

    let mut kinds = Vec::new();
    let range = resolve_with(&["~2.3.1", "2.4.0"], |f| kinds.push(f.kind));
    assert_eq!(range, "");
    assert_eq!(kinds, [FailureKind::Exact]);
}

#[test]
/// Hyphen ranges and x-ranges mixed together.
fn hyphen_and_x_ranges() {
    assert_eq!(resolve(&["1.2 - 2.4", "2.x"]), ">=2.0.0 <2.5.0");
    assert_eq!(resolve(&["1.0.0 - 1.5.0", "1.5"]), "1.5.0");
}

#[test]
/// Each feasible pairing of alternatives is kept separately.
fn several_alternatives() {
    assert_eq!(
        resolve(&["^1.0.0 || ^2.0.0 || ^3.0.0", ">=1.4.0 <3.1.0"]),
        ">=1.4.0 <2.0.0 || >=2.0.0 <3.0.0 || >=3.0.0 <3.1.0"
    );
}

#[test]
/// Overlapping results are not merged.
fn overlapping_results_stay_apart() {
    assert_eq!(
        resolve(&[">=1.0.0 || >=2.0.0", "<3.0.0"]),
        ">=1.0.0 <3.0.0 || >=2.0.0 <3.0.0"
    );
}

#[test]
/// Pre-release bounds survive the intersection.
fn pre_release_bounds() {
    assert_eq!(resolve(&[">=2.0.0-rc.1", "<2.1.0"]), ">=2.0.0-rc.1 <2.1.0");
    assert_eq!(resolve(&["2.0.0-rc.2", "~2.0.0-rc.1"]), "2.0.0-rc.2");
}

#[test]
/// Upper bounds written to exclude the next major's pre-releases.
fn strict_pre_release_upper_bound() {
    assert_eq!(resolve(&[">=1.0.0 <2.0.0-0"]), ">=1.0.0 <2.0.0-0");
    assert_eq!(resolve(&["^1.2.0", "<2.0.0-0"]), ">=1.2.0 <2.0.0-0");
    assert_eq!(resolve(&["<2.0.0-beta", ">=2.0.0-alpha"]), ">=2.0.0-alpha <2.0.0-beta");
}

#[test]
/// Three range sets at once.
fn three_way() {
    assert_eq!(
        resolve(&[">=1.0.0", "<2.0.0 || >=3.0.0", "^1.8.0 || ^3.2.0"]),
        ">=1.8.0 <2.0.0 || >=3.2.0 <4.0.0"
    );
}
