//! Version string comparison for release tags.
//!
//! This module decides whether a published release is newer than the
//! running build. Release tags are compared as three dot-separated numeric
//! components rather than full semantic versions, which is all the release
//! pipeline ever produces; there is no pre-release or build-metadata
//! handling.
//!
//! # Comparison Rules
//!
//! - **Prefix Handling**: A single leading `v` is stripped from either side
//! - **Zero Padding**: Missing trailing components count as zero, so `1.0`
//!   equals `1.0.0`
//! - **Lenient Parsing**: A component that fails to parse as a number also
//!   counts as zero, so `"not-a-version"` compares equal to `v0.0.0`
//!   rather than raising an error; `compares_garbage_component_as_zero`
//!   below pins that long-standing behavior
//! - **Short-Circuit**: Major decides before minor, minor before patch
//!
//! # Examples
//!
//! ```rust
//! use std::cmp::Ordering;
//!
//! use bookforge::upgrade::version::compare_versions;
//!
//! assert_eq!(compare_versions("v1.0.0", "v1.0.1"), Ordering::Less);
//! assert_eq!(compare_versions("2.0.0", "1.9.9"), Ordering::Greater);
//!
//! // The `v` prefix is irrelevant and short forms pad with zero.
//! assert_eq!(compare_versions("1.2.3", "v1.2.3"), Ordering::Equal);
//! assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
//! ```

use std::cmp::Ordering;

/// Compare two version strings component-wise: major, then minor, then
/// patch, short-circuiting on the first difference.
///
/// Total for any pair of inputs; symmetric and transitive for well-formed
/// ones.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    components(a).cmp(&components(b))
}

/// Split a version string into exactly three numeric components.
fn components(version: &str) -> [u64; 3] {
    let digits = version.strip_prefix('v').unwrap_or(version);
    let mut parts = digits.split('.');
    std::array::from_fn(|_| parts.next().unwrap_or("0").parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_versions_compare_equal() {
        assert_eq!(compare_versions("1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("v1.2.3", "v1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("0.0.0", "0.0.0"), Ordering::Equal);
    }

    #[test]
    fn ordering_follows_components() {
        assert_eq!(compare_versions("v1.0.0", "v1.0.1"), Ordering::Less);
        assert_eq!(compare_versions("2.0.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.1.0", "1.0.9"), Ordering::Greater);
        assert_eq!(compare_versions("0.9.9", "1.0.0"), Ordering::Less);
    }

    #[test]
    fn v_prefix_is_irrelevant() {
        assert_eq!(compare_versions("1.2.3", "v1.2.4"), Ordering::Less);
        assert_eq!(compare_versions("v2.0.0", "2.0.0"), Ordering::Equal);
    }

    #[test]
    fn short_forms_pad_with_zero() {
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.1", "1.0.5"), Ordering::Greater);
    }

    #[test]
    fn empty_strings_compare_equal() {
        assert_eq!(compare_versions("", ""), Ordering::Equal);
    }

    #[test]
    fn compares_garbage_component_as_zero() {
        // Lenient by design: non-numeric components silently parse as zero
        // instead of raising an error.
        assert_eq!(compare_versions("not-a-version", "v0.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("not-a-version", "v1.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.x.3", "1.0.3"), Ordering::Equal);
    }
}
