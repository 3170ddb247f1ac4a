//! Key pattern decoding for compiled release artifacts.
//!
//! Storage keys and filenames carry release identity in their text. A
//! [`KeyPattern`] is a compiled regex with four required named capture
//! groups that turns those opaque strings back into identity records.
use crate::release::ReleaseIdentity;
use anyhow::{bail, Context, Result};
use regex::{Captures, Regex};

/// Capture group names every pattern must define, in reporting order.
pub const REQUIRED_GROUPS: [&str; 4] = [
    "release_name",
    "release_version",
    "stemcell_os",
    "stemcell_version",
];

/// A compiled key pattern carrying the four identity capture groups.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    regex: Regex,
}

impl KeyPattern {
    /// Compile a pattern, requiring all four identity groups.
    ///
    /// Keys must match in full: the pattern is wrapped in implicit anchors,
    /// so explicit `^`/`$` markers stay valid but are not required. Extra
    /// unrelated capture groups are permitted.
    pub fn compile(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .with_context(|| format!("compile release pattern {pattern:?}"))?;
        let names: Vec<&str> = regex.capture_names().flatten().collect();
        let missing: Vec<&str> = REQUIRED_GROUPS
            .into_iter()
            .filter(|group| !names.contains(group))
            .collect();
        if !missing.is_empty() {
            bail!("release pattern is missing groups: {}", missing.join(", "));
        }
        Ok(Self { regex })
    }

    /// Decode a storage key or filename into a release identity.
    ///
    /// Captures populate the identity verbatim. A group that did not
    /// participate in the match, or captured nothing, fails the same way as
    /// a non-matching key.
    pub fn decode(&self, key: &str) -> Result<ReleaseIdentity> {
        let captures = self
            .regex
            .captures(key)
            .with_context(|| format!("key {key:?} does not match the release pattern"))?;
        let name = require_capture(&captures, "release_name", key)?;
        let version = require_capture(&captures, "release_version", key)?;
        let stemcell_os = require_capture(&captures, "stemcell_os", key)?;
        let stemcell_version = require_capture(&captures, "stemcell_version", key)?;
        Ok(ReleaseIdentity::new(
            name,
            version,
            stemcell_os,
            stemcell_version,
        ))
    }
}

fn require_capture<'t>(captures: &Captures<'t>, group: &str, key: &str) -> Result<&'t str> {
    match captures.name(group) {
        Some(capture) if !capture.as_str().is_empty() => Ok(capture.as_str()),
        _ => bail!("key {key:?} does not match the release pattern"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIXED: &str = r"^2.5/.+/(?P<release_name>[a-z-_]+)-(?P<release_version>[0-9\.]+)-(?P<stemcell_os>[a-z-_]+)-(?P<stemcell_version>[\d\.]+)\.tgz$";

    #[test]
    fn decodes_a_matching_key_field_for_field() {
        let pattern = KeyPattern::compile(PREFIXED).expect("compile pattern");
        let identity = pattern
            .decode("2.5/uaa/uaa-1.2.3-ubuntu-trusty-123.tgz")
            .expect("decode key");
        assert_eq!(
            identity,
            ReleaseIdentity::new("uaa", "1.2.3", "ubuntu-trusty", "123")
        );
    }

    #[test]
    fn rejects_a_key_that_does_not_match() {
        let pattern = KeyPattern::compile(PREFIXED).expect("compile pattern");
        let err = pattern
            .decode("2.5/uaa/uaa-1.2.3-123.tgz")
            .expect_err("key without stemcell must not decode");
        assert!(err.to_string().contains("does not match"), "{err}");
    }

    #[test]
    fn compile_reports_one_missing_group() {
        let err = KeyPattern::compile(
            r"^2.5/.+/([a-z-_]+)-(?P<release_version>[0-9\.]+)-(?P<stemcell_os>[a-z-_]+)-(?P<stemcell_version>[\d\.]+)\.tgz$",
        )
        .expect_err("unnamed release_name group must fail compile");
        assert!(
            err.to_string().contains("missing groups: release_name"),
            "{err}"
        );
    }

    #[test]
    fn compile_reports_all_missing_groups_in_fixed_order() {
        let err = KeyPattern::compile(r"^releases/(.+)\.tgz$")
            .expect_err("pattern without named groups must fail compile");
        assert!(
            err.to_string().contains(
                "missing groups: release_name, release_version, stemcell_os, stemcell_version"
            ),
            "{err}"
        );
    }

    #[test]
    fn compile_rejects_malformed_regex() {
        let err = KeyPattern::compile(r"(?P<release_name>[a-z").expect_err("unbalanced class");
        assert!(err.to_string().contains("compile release pattern"), "{err}");
    }

    #[test]
    fn extra_unrelated_groups_are_permitted() {
        let pattern = KeyPattern::compile(
            r"(?P<channel>[0-9.]+)/(?P<release_name>[a-z]+)-(?P<release_version>[0-9.]+)-(?P<stemcell_os>[a-z-]+)-(?P<stemcell_version>[0-9.]+)\.tgz",
        )
        .expect("compile pattern with extra group");
        let identity = pattern
            .decode("2.5/uaa-1.2.3-ubuntu-trusty-123.tgz")
            .expect("decode key");
        assert_eq!(identity.name, "uaa");
        assert_eq!(identity.stemcell_version, "123");
    }

    #[test]
    fn matching_is_full_string_even_without_explicit_anchors() {
        let pattern = KeyPattern::compile(
            r"(?P<release_name>[a-z]+)-(?P<release_version>[0-9.]+)-(?P<stemcell_os>[a-z-]+)-(?P<stemcell_version>[0-9.]+)\.tgz",
        )
        .expect("compile unanchored pattern");
        pattern
            .decode("uaa-1.2.3-ubuntu-trusty-123.tgz")
            .expect("whole-key match decodes");
        pattern
            .decode("prefix/uaa-1.2.3-ubuntu-trusty-123.tgz")
            .expect_err("partial match must not decode");
    }

    #[test]
    fn empty_capture_fails_like_no_match() {
        let pattern = KeyPattern::compile(
            r"(?P<release_name>[a-z]*)(?P<release_version>[0-9.]+)-(?P<stemcell_os>[a-z-]+)-(?P<stemcell_version>[0-9.]+)\.tgz",
        )
        .expect("compile pattern");
        let err = pattern
            .decode("1.2.3-ubuntu-trusty-123.tgz")
            .expect_err("empty release_name capture must not decode");
        assert!(err.to_string().contains("does not match"), "{err}");
    }

    #[test]
    fn optional_group_that_did_not_participate_fails_like_no_match() {
        let pattern = KeyPattern::compile(
            r"(?:(?P<release_name>[a-z]+)/)?(?P<release_version>[0-9.]+)-(?P<stemcell_os>[a-z-]+)-(?P<stemcell_version>[0-9.]+)\.tgz",
        )
        .expect("compile pattern");
        pattern
            .decode("uaa/1.2.3-ubuntu-trusty-123.tgz")
            .expect("participating group decodes");
        pattern
            .decode("1.2.3-ubuntu-trusty-123.tgz")
            .expect_err("missing participation must not decode");
    }
}
