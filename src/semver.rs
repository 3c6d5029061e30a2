//! Version triple parsing and comparison
//!
//! Declared and registry versions are treated as `major.minor.patch`
//! non-negative integers. Segments that are missing or fail to parse
//! default to 0, so malformed input never aborts a comparison.

/// A parsed `major.minor.patch` version
///
/// The derived `Ord` gives lexicographic tuple ordering: major first,
/// then minor, then patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionTriple {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionTriple {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string, defaulting unparsable segments to 0.
    ///
    /// Examples:
    /// - "1.2.3" -> (1, 2, 3)
    /// - "1.2" -> (1, 2, 0)
    /// - "abc" -> (0, 0, 0)
    pub fn parse(version: &str) -> Self {
        let mut segments = version.split('.');
        let mut next = || {
            segments
                .next()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(0)
        };
        Self::new(next(), next(), next())
    }

    /// Parse a version string, rejecting it unless the first three dotted
    /// segments are all numeric. Trailing segments are ignored (Packagist
    /// normalized versions carry four).
    pub fn parse_strict(version: &str) -> Option<Self> {
        let mut segments = version.split('.');
        let mut next = || segments.next()?.trim().parse::<u64>().ok();
        Some(Self::new(next()?, next()?, next()?))
    }
}

impl std::fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Returns true when `latest` is strictly newer than `current` under
/// tuple ordering.
pub fn is_outdated(latest: &str, current: &str) -> bool {
    VersionTriple::parse(latest) > VersionTriple::parse(current)
}
