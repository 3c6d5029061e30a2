//! Common types for the manifest layer

/// Known manifest formats, discriminated by file name
///
/// The same discriminant selects both the parser and the registry client
/// for the packages a manifest declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// npm-style manifest (package.json)
    Npm,
    /// composer-style manifest (composer.json)
    Composer,
}

impl ManifestKind {
    /// Returns the string representation of the manifest kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestKind::Npm => "npm",
            ManifestKind::Composer => "composer",
        }
    }

    /// Canonical manifest file name for this kind
    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestKind::Npm => "package.json",
            ManifestKind::Composer => "composer.json",
        }
    }

    /// Detect the manifest kind from a file name
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match file_name {
            "package.json" => Some(ManifestKind::Npm),
            "composer.json" => Some(ManifestKind::Composer),
            _ => None,
        }
    }
}

/// One dependency declared in one manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Package name (e.g., "lodash", "monolog/monolog")
    pub name: String,
    /// Declared version after constraint stripping
    pub declared_constraint: String,
    /// Manifest file the dependency came from
    pub source_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("package.json", Some(ManifestKind::Npm))]
    #[case("composer.json", Some(ManifestKind::Composer))]
    #[case("Cargo.toml", None)]
    #[case("go.mod", None)]
    #[case("Package.json", None)] // exact match only
    fn from_file_name_detects_known_manifests(
        #[case] file_name: &str,
        #[case] expected: Option<ManifestKind>,
    ) {
        assert_eq!(ManifestKind::from_file_name(file_name), expected);
    }

    #[test]
    fn file_name_round_trips_through_detection() {
        for kind in [ManifestKind::Npm, ManifestKind::Composer] {
            assert_eq!(ManifestKind::from_file_name(kind.file_name()), Some(kind));
        }
    }
}
