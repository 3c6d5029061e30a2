//! Manifest layer
//! - types.rs: ManifestKind discriminant and ManifestEntry
//! - traits.rs: ManifestParser trait and ParseError
//! - package_json.rs: npm-style manifest parser
//! - composer_json.rs: composer-style manifest parser

pub mod composer_json;
pub mod package_json;
pub mod traits;
pub mod types;

pub use composer_json::ComposerJsonParser;
pub use package_json::PackageJsonParser;
pub use traits::{ManifestParser, ParseError};
pub use types::{ManifestEntry, ManifestKind};

use std::collections::BTreeMap;

/// Parse a manifest document, selecting the parser by file name.
///
/// Returns `ParseError::UnsupportedFormat` for file names that are not a
/// known manifest.
pub fn parse_manifest(
    file_name: &str,
    manifest: &serde_json::Value,
) -> Result<BTreeMap<String, String>, ParseError> {
    let kind = ManifestKind::from_file_name(file_name)
        .ok_or_else(|| ParseError::UnsupportedFormat(file_name.to_string()))?;

    match kind {
        ManifestKind::Npm => PackageJsonParser.parse(manifest),
        ManifestKind::Composer => ComposerJsonParser.parse(manifest),
    }
}
