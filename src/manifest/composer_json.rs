//! composer-style manifest parser (composer.json)

use std::collections::BTreeMap;

use serde_json::Value;

use crate::manifest::traits::{ManifestParser, ParseError};

/// Parser for `require` and `require-dev` sections
pub struct ComposerJsonParser;

/// Reduce a composer constraint to a single declared version.
///
/// Strips `*` and `^`, splits on `|`, and takes the last alternative.
/// Deliberately simplistic: no semver range resolution, just a stable
/// policy for picking one version out of a constraint like `^7.2|^8.0`.
fn declared_version(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| *c != '*' && *c != '^').collect();
    stripped
        .split('|')
        .next_back()
        .unwrap_or("")
        .trim()
        .to_string()
}

impl ManifestParser for ComposerJsonParser {
    fn parse(&self, manifest: &Value) -> Result<BTreeMap<String, String>, ParseError> {
        let root = manifest
            .as_object()
            .ok_or_else(|| ParseError::InvalidShape("manifest root is not an object".into()))?;

        let mut packages = BTreeMap::new();
        for section in ["require", "require-dev"] {
            let Some(value) = root.get(section) else {
                continue;
            };
            let deps = value.as_object().ok_or_else(|| {
                ParseError::InvalidShape(format!("{section} is not an object"))
            })?;

            for (name, constraint) in deps {
                if let Some(constraint) = constraint.as_str() {
                    packages.insert(name.clone(), declared_version(constraint));
                }
            }
        }

        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("^7.2|^8.0", "8.0")] // last alternative wins
    #[case("^2.0", "2.0")]
    #[case("5.*", "5.")]
    #[case("7.4", "7.4")]
    fn declared_version_takes_last_alternative(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(declared_version(raw), expected);
    }

    #[test]
    fn parse_merges_require_and_require_dev() {
        let manifest = json!({
            "require": {
                "php": "^7.2|^8.0",
                "monolog/monolog": "^2.3"
            },
            "require-dev": {
                "phpunit/phpunit": "^9.5"
            }
        });

        let packages = ComposerJsonParser.parse(&manifest).unwrap();
        assert_eq!(packages.len(), 3);
        assert_eq!(packages.get("php").map(String::as_str), Some("8.0"));
        assert_eq!(
            packages.get("monolog/monolog").map(String::as_str),
            Some("2.3")
        );
        assert_eq!(
            packages.get("phpunit/phpunit").map(String::as_str),
            Some("9.5")
        );
    }

    #[test]
    fn parse_returns_empty_when_sections_absent() {
        let packages = ComposerJsonParser.parse(&json!({"name": "acme/app"})).unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn parse_rejects_non_object_require_section() {
        let result = ComposerJsonParser.parse(&json!({"require": [1, 2]}));
        assert!(matches!(result, Err(ParseError::InvalidShape(_))));
    }
}
