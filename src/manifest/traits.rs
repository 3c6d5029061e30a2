//! ManifestParser trait definition

use std::collections::BTreeMap;

/// Trait for extracting declared dependencies from a manifest document
///
/// Parsers return a sorted map so that repeated resolutions of the same
/// repository produce identical package lists.
pub trait ManifestParser {
    /// Parse the manifest and return `name -> declared version`
    fn parse(&self, manifest: &serde_json::Value)
        -> Result<BTreeMap<String, String>, ParseError>;
}

/// Error type for manifest parsing
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The manifest lacks the container shape the format requires
    #[error("Invalid manifest shape: {0}")]
    InvalidShape(String),

    /// The file name does not match a known manifest format
    #[error("Unsupported manifest file: {0}")]
    UnsupportedFormat(String),
}
