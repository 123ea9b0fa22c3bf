use semver::Version;
use std::cmp::Ordering;
use thiserror::Error;

/// Represents errors that can occur while selecting an effective version.
#[derive(Debug, Error)]
pub enum VersionError {
    /// No label survived snapshot filtering.
    #[error("no stable version left after filtering out snapshots")]
    NoStableVersion,
}

/// Returns `true` when a version label names a snapshot build.
///
/// Snapshot labels on this registry carry a `w` marker (e.g. `24w10a`);
/// the check is case-insensitive.
pub fn is_snapshot(label: &str) -> bool {
    label.bytes().any(|b| b.eq_ignore_ascii_case(&b'w'))
}

/// Selects the effective latest version from a set of version labels.
///
/// Snapshot labels are discarded first; the remaining labels are ordered
/// with [`compare`] and the maximum is returned as it appeared in the
/// input, without normalization applied to the returned string.
///
/// # Arguments
///
/// * `labels` - The version labels reported by the registry.
///
/// # Errors
///
/// Returns `VersionError::NoStableVersion` when every label is a snapshot
/// or the input is empty.
pub fn effective_latest(labels: &[String]) -> Result<&str, VersionError> {
    labels
        .iter()
        .map(String::as_str)
        .filter(|label| !is_snapshot(label))
        .max_by(|a, b| compare(a, b))
        .ok_or(VersionError::NoStableVersion)
}

/// Compares two version labels under a total order.
///
/// Labels are normalized to three numeric components before comparison, so
/// `"1.20"` and `"1.20.0"` are equal. Labels that do not normalize order
/// below every label that does, and fall back to lexicographic order among
/// themselves so the ordering stays total.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (normalize(a), normalize(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Pads a dot-separated numeric label to three components and parses it as
/// a semantic version. A `-` suffix is carried over as the pre-release part.
fn normalize(label: &str) -> Option<Version> {
    if let Ok(version) = Version::parse(label) {
        return Some(version);
    }

    let (core, pre) = match label.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (label, None),
    };

    let parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut components = [0u64; 3];
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        components[i] = part.parse().ok()?;
    }

    let padded = match pre {
        Some(pre) => format!(
            "{}.{}.{}-{}",
            components[0], components[1], components[2], pre
        ),
        None => format!("{}.{}.{}", components[0], components[1], components[2]),
    };
    Version::parse(&padded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn excludes_snapshots_and_picks_the_maximum() {
        let set = labels(&["1.20", "1.20.1", "24w10a"]);
        assert_eq!(effective_latest(&set).unwrap(), "1.20.1");
    }

    #[test]
    fn snapshot_marker_is_case_insensitive() {
        assert!(is_snapshot("24w10a"));
        assert!(is_snapshot("24W10A"));
        assert!(!is_snapshot("1.20.4"));
    }

    #[test]
    fn errors_when_only_snapshots_remain() {
        let set = labels(&["24w10a", "23w51b"]);
        assert!(matches!(
            effective_latest(&set),
            Err(VersionError::NoStableVersion)
        ));
    }

    #[test]
    fn errors_on_empty_input() {
        assert!(effective_latest(&[]).is_err());
    }

    #[test]
    fn two_component_labels_equal_their_padded_form() {
        assert_eq!(compare("1.20", "1.20.0"), Ordering::Equal);
        assert_eq!(compare("1.21", "1.21.0"), Ordering::Equal);
    }

    #[test]
    fn orders_numerically_not_lexically() {
        assert_eq!(compare("1.9", "1.10"), Ordering::Less);
        assert_eq!(compare("1.20.1", "1.20"), Ordering::Greater);
    }

    #[test]
    fn pre_release_orders_below_the_release() {
        assert_eq!(compare("1.21-rc1", "1.21"), Ordering::Less);
    }

    #[test]
    fn unparsable_labels_order_below_parsable_ones() {
        assert_eq!(compare("oddball", "1.20"), Ordering::Less);
        assert_eq!(compare("1.20", "oddball"), Ordering::Greater);
        assert_eq!(compare("oddball", "oddball"), Ordering::Equal);
    }

    #[test]
    fn compare_is_consistent_with_effective_latest() {
        let set = labels(&["1.19.4", "1.20", "1.20.1", "1.18.2"]);
        let latest = effective_latest(&set).unwrap();
        for label in &set {
            assert_ne!(compare(label, latest), Ordering::Greater);
        }
    }

    #[test]
    fn compare_is_transitive_over_mixed_labels() {
        let a = "1.19";
        let b = "1.20";
        let c = "1.20.1";
        assert_eq!(compare(a, b), Ordering::Less);
        assert_eq!(compare(b, c), Ordering::Less);
        assert_eq!(compare(a, c), Ordering::Less);
    }

    #[test]
    fn returns_the_original_label_not_the_normalized_form() {
        let set = labels(&["1.20"]);
        assert_eq!(effective_latest(&set).unwrap(), "1.20");
    }
}
