//! JSON Schema lookup and validation
//!
//! Schema documents are resolved by file name. An override directory is
//! consulted first; the copies under `schemas/` compiled into the binary
//! are the fallback, so the suite runs from any working directory.

use std::collections::HashMap;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

use crate::common::{Error, Result};

/// Full post shape, used for GET and POST responses
pub const POST_SCHEMA: &str = "post-schema.json";

/// Looser shape for PUT and PATCH responses
pub const POST_UPDATE_SCHEMA: &str = "post-update-schema.json";

const BUILTIN_SCHEMAS: &[(&str, &str)] = &[
    (POST_SCHEMA, include_str!("../schemas/post-schema.json")),
    (POST_UPDATE_SCHEMA, include_str!("../schemas/post-update-schema.json")),
];

/// Compiled schema validators keyed by file name
pub struct SchemaRegistry {
    validators: HashMap<String, Validator>,
}

impl SchemaRegistry {
    /// Registry containing only the built-in schema documents
    pub fn builtin() -> Result<Self> {
        Self::load(None)
    }

    /// Load the built-in schemas, replacing or extending them with every
    /// `*.json` document found in `override_dir`
    pub fn load(override_dir: Option<&Path>) -> Result<Self> {
        let mut sources: HashMap<String, String> = BUILTIN_SCHEMAS
            .iter()
            .map(|(name, text)| (name.to_string(), text.to_string()))
            .collect();

        if let Some(dir) = override_dir {
            let entries = std::fs::read_dir(dir).map_err(|e| {
                Error::Config(format!(
                    "Failed to read schema directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;

            for entry in entries {
                let path = entry?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                let text = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
                    path: path.display().to_string(),
                    error: e.to_string(),
                })?;
                debug!(schema = name, path = %path.display(), "loaded schema override");
                sources.insert(name.to_string(), text);
            }
        }

        let mut validators = HashMap::with_capacity(sources.len());
        for (name, text) in sources {
            let document: Value =
                serde_json::from_str(&text).map_err(|e| Error::schema_compile(&name, e))?;
            let validator =
                jsonschema::validator_for(&document).map_err(|e| Error::schema_compile(&name, e))?;
            validators.insert(name, validator);
        }

        Ok(Self { validators })
    }

    /// Names of all registered schemas, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All violations of `instance` against schema `name`; empty when it conforms
    pub fn violations(&self, name: &str, instance: &Value) -> Result<Vec<String>> {
        let validator = self
            .validators
            .get(name)
            .ok_or_else(|| Error::SchemaNotFound {
                name: name.to_string(),
                known: self.names().join(", "),
            })?;

        Ok(validator
            .iter_errors(instance)
            .map(|error| error.to_string())
            .collect())
    }

    /// Fail with an assertion error listing every violation
    pub fn check(&self, name: &str, instance: &Value) -> Result<()> {
        let violations = self.violations(name, instance)?;
        if violations.is_empty() {
            return Ok(());
        }

        Err(Error::assertion(format!(
            "Response does not match schema '{}': {}",
            name,
            violations.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_post() -> Value {
        json!({
            "userId": 1,
            "id": 1,
            "title": "sunt aut facere",
            "body": "quia et suscipit"
        })
    }

    #[test]
    fn test_builtin_names() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert_eq!(registry.names(), vec![POST_SCHEMA, POST_UPDATE_SCHEMA]);
    }

    #[test]
    fn test_full_post_conforms_to_both() {
        let registry = SchemaRegistry::builtin().unwrap();
        registry.check(POST_SCHEMA, &sample_post()).unwrap();
        registry.check(POST_UPDATE_SCHEMA, &sample_post()).unwrap();
    }

    #[test]
    fn test_post_schema_requires_all_fields() {
        let registry = SchemaRegistry::builtin().unwrap();
        let partial = json!({"id": 1, "title": "only a title"});

        let violations = registry.violations(POST_SCHEMA, &partial).unwrap();
        assert_eq!(violations.len(), 2, "{violations:?}");

        // The update schema only insists on the id.
        registry.check(POST_UPDATE_SCHEMA, &partial).unwrap();
    }

    #[test]
    fn test_wrong_types_are_reported() {
        let registry = SchemaRegistry::builtin().unwrap();
        let bad = json!({"id": "1", "title": 7, "body": "b", "userId": 1});

        let err = registry.check(POST_SCHEMA, &bad).unwrap_err();
        assert!(err.is_assertion());
        assert!(err.to_string().contains(POST_SCHEMA));
    }

    #[test]
    fn test_empty_object_fails_update_schema() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert!(registry.check(POST_UPDATE_SCHEMA, &json!({})).is_err());
    }

    #[test]
    fn test_unknown_schema() {
        let registry = SchemaRegistry::builtin().unwrap();
        let err = registry.check("comment-schema.json", &json!({})).unwrap_err();
        assert!(matches!(err, Error::SchemaNotFound { .. }));
        assert!(err
            .to_string()
            .ends_with("Known schemas: post-schema.json, post-update-schema.json"));
    }

    #[test]
    fn test_override_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(POST_SCHEMA),
            r#"{"type": "object", "required": ["slug"]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let registry = SchemaRegistry::load(Some(dir.path())).unwrap();
        assert!(registry.check(POST_SCHEMA, &sample_post()).is_err());
        registry.check(POST_SCHEMA, &json!({"slug": "x"})).unwrap();
        // Untouched built-ins are still available.
        registry.check(POST_UPDATE_SCHEMA, &sample_post()).unwrap();
    }

    #[test]
    fn test_override_with_broken_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let err = SchemaRegistry::load(Some(dir.path())).err().unwrap();
        assert!(matches!(err, Error::SchemaCompile { .. }));
    }
}
