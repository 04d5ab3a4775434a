//! Update decisions over free-form version strings
//!
//! The policy is asymmetric:
//! - unknown *local* state (not installed, probe error) means "update"
//! - unknown *remote* state (registry error, package not found) means "don't"
//! - anything else is decided by a lossy numeric comparison
//!
//! Version parsing is lossy: after stripping a leading `v` and a single
//! trailing `.0`, the string is split on `.` and only purely-digit tokens are
//! kept. A missing trailing component compares as `0`. Digit tokens are
//! compared by magnitude without converting them to integers, so arbitrarily
//! long components are ordered correctly.

use std::cmp::Ordering;

use crate::version::error::VersionError;
use crate::version::types::Sentinel;

/// Outcome of comparing a local version against the latest available one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Local state is `not installed` or `error`
    UnresolvedLocalState(Sentinel),
    /// Latest version is `error` or `not found`
    UnresolvedRemoteState(Sentinel),
    /// Both strings are identical after normalization
    Identical,
    /// Latest is ahead of current
    Outdated,
    /// Equal once padded with zeros
    UpToDate,
    /// Current is ahead of latest (pre-release or locally built)
    Ahead,
}

impl Decision {
    pub fn update_needed(&self) -> bool {
        matches!(
            self,
            Decision::UnresolvedLocalState(_) | Decision::Outdated
        )
    }
}

/// Decide whether `current` should be updated to `latest`
///
/// Never fails. A side without any digit-only token compares as all zeros.
///
/// ```
/// use toolsentry::version::oracle::needs_update;
///
/// assert!(needs_update("not installed", "1.0.0"));
/// assert!(needs_update("1.9.0", "1.10.0"));
/// assert!(!needs_update("1.2.3", "error"));
/// assert!(!needs_update("v1.2.0", "1.2"));
/// ```
pub fn needs_update(current: &str, latest: &str) -> bool {
    evaluate(current, latest).update_needed()
}

/// Same policy as [`needs_update`], keeping the reason for the outcome
pub fn evaluate(current: &str, latest: &str) -> Decision {
    if let Some(sentinel @ (Sentinel::NotInstalled | Sentinel::Error)) =
        Sentinel::classify(current)
    {
        return Decision::UnresolvedLocalState(sentinel);
    }

    if let Some(sentinel @ (Sentinel::Error | Sentinel::NotFound)) = Sentinel::classify(latest) {
        return Decision::UnresolvedRemoteState(sentinel);
    }

    let current = normalize(current);
    let latest = normalize(latest);

    if current == latest {
        return Decision::Identical;
    }

    match compare_padded(&numeric_components(current), &numeric_components(latest)) {
        Ordering::Less => Decision::Outdated,
        Ordering::Equal => Decision::UpToDate,
        Ordering::Greater => Decision::Ahead,
    }
}

/// Strip one leading `v`/`V`, then one trailing literal `.0`
///
/// The `.0` strip is textual and applied once to the whole string, so
/// `1.0.0` becomes `1.0`, not `1`.
fn normalize(raw: &str) -> &str {
    let without_prefix = raw
        .strip_prefix(|c: char| c == 'v' || c == 'V')
        .unwrap_or(raw);
    without_prefix.strip_suffix(".0").unwrap_or(without_prefix)
}

/// Digit-only tokens with leading zeros removed (`007` -> `7`, `00` -> `0`)
fn numeric_components(normalized: &str) -> Vec<&str> {
    normalized
        .split('.')
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .map(|token| match token.trim_start_matches('0') {
            "" => "0",
            digits => digits,
        })
        .collect()
}

/// Order two canonical digit strings by numeric value
fn compare_component(left: &str, right: &str) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

/// Component at `index`, or `0` past the end
fn component_at<S: AsRef<str>>(components: &[S], index: usize) -> &str {
    components.get(index).map_or("0", |c| c.as_ref())
}

fn compare_padded<S: AsRef<str>>(left: &[S], right: &[S]) -> Ordering {
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| compare_component(component_at(left, i), component_at(right, i)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Numeric components of a version string, ordered with zero padding
///
/// `2.3` and `2.3.0` are equal under this ordering.
#[derive(Debug, Clone)]
pub struct NormalizedVersion(Vec<String>);

impl NormalizedVersion {
    /// Parse a version string; sentinels and strings without any digit-only
    /// token are rejected since they have no place in an ordering
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        if let Some(sentinel) = Sentinel::classify(raw) {
            return Err(VersionError::Sentinel(sentinel));
        }

        let normalized = normalize(raw);
        let components = numeric_components(normalized);
        if components.is_empty() {
            return Err(VersionError::NoNumericComponents(normalized.to_string()));
        }

        Ok(Self(components.into_iter().map(String::from).collect()))
    }

    /// Components without leading zeros, most significant first
    pub fn components(&self) -> &[String] {
        &self.0
    }
}

impl PartialEq for NormalizedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NormalizedVersion {}

impl PartialOrd for NormalizedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_padded(&self.0, &other.0)
    }
}

/// Compare two version strings under the normalized ordering
///
/// Returns `None` if either side is a sentinel or has no numeric component.
pub fn compare_versions(left: &str, right: &str) -> Option<Ordering> {
    let left = NormalizedVersion::parse(left).ok()?;
    let right = NormalizedVersion::parse(right).ok()?;
    Some(left.cmp(&right))
}

/// Sort version strings ascending; unparseable strings go first
///
/// The sort is stable, so equal versions (`1.2` and `1.2.0`) keep their
/// relative order.
pub fn sort_versions(versions: &mut [String]) {
    versions.sort_by_cached_key(|v| NormalizedVersion::parse(v).ok());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("not installed", "1.2.3", true)]
    #[case("not installed", "error", true)]
    #[case("not installed", "not found", true)]
    #[case("not installed", "not installed", true)]
    #[case("error", "1.2.3", true)]
    #[case("error", "error", true)]
    #[case("1.2.3", "error", false)]
    #[case("1.2.3", "not found", false)]
    #[case("1.2.3", "1.2.3", false)]
    #[case("v1.2.3", "1.2.3", false)]
    #[case("V1.2.3", "v1.2.3", false)]
    #[case("1.2.0", "1.2", false)]
    #[case("1.9.0", "1.10.0", true)]
    #[case("2.0.0", "1.9.9", false)]
    #[case("1.2", "1.2.0.1", true)]
    #[case("1.2.3", "1.2.4", true)]
    #[case("v3.1.0", "v3.2.0", true)]
    #[case("3.2.0-beta", "3.2.0", false)] // suffix token dropped, equal after padding
    #[case("1.0.0", "1", false)] // [1, 0] vs [1]
    #[case("unknown", "1.2.3", true)] // [] padded to [0, 0, 0]
    #[case("dev", "1.0.1", true)]
    #[case("build-abc", "2.1.5", true)]
    #[case("1.2.3", "unknown", false)]
    #[case("dev", "nightly", false)] // both empty after filtering
    #[case("1.2.3", "not installed", false)]
    #[case("nightly", "nightly", false)] // identical fast path
    #[case("1.99999999999999999999", "2.0", true)]
    #[case("1.99999999999999999999", "1.100000000000000000000", true)]
    #[case("1.0099", "1.99", false)] // leading zeros ignored
    #[case("1.2.3", "ERROR", false)] // not a sentinel, compares as [0]
    fn needs_update_returns_expected(
        #[case] current: &str,
        #[case] latest: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(needs_update(current, latest), expected);
    }

    #[rstest]
    #[case("1.2.3", "1.2.3", Decision::Identical)]
    #[case("1.2", "1.2.0.0", Decision::UpToDate)]
    #[case("1.2.3", "1.3.0", Decision::Outdated)]
    #[case("1.4.0", "1.3.0", Decision::Ahead)]
    #[case("error", "1.3.0", Decision::UnresolvedLocalState(Sentinel::Error))]
    #[case("1.3.0", "not found", Decision::UnresolvedRemoteState(Sentinel::NotFound))]
    fn evaluate_reports_reason(
        #[case] current: &str,
        #[case] latest: &str,
        #[case] expected: Decision,
    ) {
        assert_eq!(evaluate(current, latest), expected);
    }

    #[rstest]
    #[case("unknown", "1.0.1", Decision::Outdated)]
    #[case("1.0.1", "dev", Decision::Ahead)]
    #[case("dev", "nightly", Decision::UpToDate)]
    fn evaluate_pads_versions_without_digits(
        #[case] current: &str,
        #[case] latest: &str,
        #[case] expected: Decision,
    ) {
        assert_eq!(evaluate(current, latest), expected);
    }

    #[rstest]
    #[case("1.2.3")]
    #[case("v10.0.1")]
    #[case("0.0")]
    #[case("2024.01.15")]
    #[case("1.2.3-rc1")]
    fn same_version_never_needs_update(#[case] version: &str) {
        assert!(!needs_update(version, version));
        // no hidden state between calls
        assert_eq!(needs_update(version, version), needs_update(version, version));
    }

    #[rstest]
    #[case("v1.0.0", "1.0")]
    #[case("1.2.0", "1.2")]
    #[case("1.0.0.0", "1.0.0")] // only one `.0` is removed
    #[case(" v2.1 ", " v2.1 ")] // whitespace is not trimmed
    #[case("vv1.0", "v1")]
    fn normalize_strips_prefix_and_single_suffix(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw), expected);
    }

    #[test]
    fn normalized_version_pads_missing_components() {
        let short = NormalizedVersion::parse("2.3").unwrap();
        let long = NormalizedVersion::parse("2.3.0").unwrap();

        assert_eq!(short, long);
        assert_eq!(short.components(), ["2", "3"]);
    }

    #[test]
    fn normalized_version_orders_components_beyond_u64() {
        let small = NormalizedVersion::parse("1.18446744073709551615").unwrap();
        let large = NormalizedVersion::parse("1.18446744073709551616").unwrap();
        let padded = NormalizedVersion::parse("1.0018446744073709551616").unwrap();

        assert!(small < large);
        assert_eq!(large, padded);
        assert_eq!(padded.components(), ["1", "18446744073709551616"]);
    }

    #[test]
    fn normalized_version_rejects_sentinels() {
        assert_eq!(
            NormalizedVersion::parse("not found").unwrap_err(),
            VersionError::Sentinel(Sentinel::NotFound)
        );
    }

    #[rstest]
    #[case("1.9.0", "1.10.0", Some(Ordering::Less))]
    #[case("v2.0", "2.0.0", Some(Ordering::Equal))]
    #[case("3.0.1", "3.0.0", Some(Ordering::Greater))]
    #[case("error", "3.0.0", None)]
    #[case("3.0.0", "beta", None)]
    fn compare_versions_returns_expected(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Option<Ordering>,
    ) {
        assert_eq!(compare_versions(left, right), expected);
    }

    #[test]
    fn sort_versions_orders_numerically_with_unparseable_first() {
        let mut versions: Vec<String> = ["1.10.0", "v1.9.0", "error", "1.2", "1.2.0", "0.9"]
            .into_iter()
            .map(String::from)
            .collect();

        sort_versions(&mut versions);

        assert_eq!(
            versions,
            vec!["error", "0.9", "1.2", "1.2.0", "v1.9.0", "1.10.0"]
        );
    }
}
