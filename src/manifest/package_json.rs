//! npm-style manifest parser (package.json)

use std::collections::BTreeMap;

use serde_json::Value;

use crate::manifest::traits::{ManifestParser, ParseError};

/// Parser for `dependencies` and `devDependencies` sections
pub struct PackageJsonParser;

impl ManifestParser for PackageJsonParser {
    fn parse(&self, manifest: &Value) -> Result<BTreeMap<String, String>, ParseError> {
        let root = manifest
            .as_object()
            .ok_or_else(|| ParseError::InvalidShape("manifest root is not an object".into()))?;

        let mut packages = BTreeMap::new();
        for section in ["dependencies", "devDependencies"] {
            let Some(value) = root.get(section) else {
                continue;
            };
            let deps = value.as_object().ok_or_else(|| {
                ParseError::InvalidShape(format!("{section} is not an object"))
            })?;

            for (name, constraint) in deps {
                if let Some(constraint) = constraint.as_str() {
                    packages.insert(
                        name.clone(),
                        constraint.trim_start_matches('^').to_string(),
                    );
                }
            }
        }

        Ok(packages)
    }
}
