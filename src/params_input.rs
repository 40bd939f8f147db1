//! Assembling the parameter bag from the command line.
//!
//! Layers, lowest first: config defaults for the mode, `--params-file`,
//! `--params`, then each `--set KEY=VALUE` in order. Objects merge key by
//! key; anything else replaces the lower layer.

use randkit_core::{GeneratorParams, ParamsError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Error type for parameter input.
#[derive(Debug, thiserror::Error)]
pub enum ParamsInputError {
    #[error("Failed to read params file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {what}: {source}")]
    Json {
        what: String,
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {what}: {source}")]
    Yaml {
        what: String,
        source: serde_yaml::Error,
    },

    #[error("{what} must be an object")]
    NotAnObject { what: String },

    #[error("Invalid --set '{0}': expected KEY=VALUE")]
    InvalidSet(String),

    #[error(transparent)]
    Params(#[from] ParamsError),
}

/// Parameter sources given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ParamsInput {
    pub inline: Option<String>,
    pub file: Option<PathBuf>,
    pub sets: Vec<String>,
}

impl ParamsInput {
    /// Merge every layer on top of `defaults` and parse the result.
    pub fn resolve(&self, defaults: Option<&Value>) -> Result<GeneratorParams, ParamsInputError> {
        let mut merged = defaults.cloned().unwrap_or_else(|| Value::Object(Map::new()));

        if let Some(path) = &self.file {
            merge(&mut merged, read_file(path)?);
        }
        if let Some(inline) = &self.inline {
            let value = serde_json::from_str(inline).map_err(|source| ParamsInputError::Json {
                what: "--params".to_string(),
                source,
            })?;
            merge(&mut merged, require_object(value, "--params")?);
        }
        for set in &self.sets {
            apply_set(&mut merged, set)?;
        }

        Ok(GeneratorParams::from_value(merged)?)
    }
}

fn read_file(path: &Path) -> Result<Value, ParamsInputError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParamsInputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let what = path.display().to_string();
    let value: Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|source| ParamsInputError::Yaml {
                what: what.clone(),
                source,
            })?
        }
        _ => serde_json::from_str(&content).map_err(|source| ParamsInputError::Json {
            what: what.clone(),
            source,
        })?,
    };
    require_object(value, &what)
}

fn require_object(value: Value, what: &str) -> Result<Value, ParamsInputError> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(ParamsInputError::NotAnObject {
            what: what.to_string(),
        })
    }
}

/// Recursively merge `upper` into `base`.
fn merge(base: &mut Value, upper: Value) {
    match (base, upper) {
        (Value::Object(base), Value::Object(upper)) => {
            for (key, value) in upper {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, upper) => *base = upper,
    }
}

/// Apply one `KEY=VALUE` override. Dotted keys reach into nested objects
/// (`pool_a.pick=6`). The value is read as JSON when it parses, otherwise
/// as a plain string.
fn apply_set(target: &mut Value, set: &str) -> Result<(), ParamsInputError> {
    let (key, raw) = set
        .split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .ok_or_else(|| ParamsInputError::InvalidSet(set.to_string()))?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let mut update = value;
    for part in key.trim().rsplit('.') {
        let mut object = Map::new();
        object.insert(part.to_string(), update);
        update = Value::Object(object);
    }
    merge(target, update);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_nested() {
        let mut base = json!({"min": 1, "pool_a": {"min": 1, "max": 69}});
        merge(&mut base, json!({"pool_a": {"max": 49}, "count": 3}));
        assert_eq!(base, json!({"min": 1, "count": 3, "pool_a": {"min": 1, "max": 49}}));
    }

    #[test]
    fn test_set_parses_json_or_falls_back_to_text() {
        let mut target = json!({});
        apply_set(&mut target, "count=5").unwrap();
        apply_set(&mut target, "heads_label=Yes").unwrap();
        apply_set(&mut target, "pool_a.pick=6").unwrap();
        apply_set(&mut target, "items=[\"a\",\"b\"]").unwrap();
        assert_eq!(
            target,
            json!({"count": 5, "heads_label": "Yes", "pool_a": {"pick": 6}, "items": ["a", "b"]})
        );
    }

    #[test]
    fn test_invalid_set() {
        let mut target = json!({});
        assert!(matches!(
            apply_set(&mut target, "count"),
            Err(ParamsInputError::InvalidSet(_))
        ));
        assert!(apply_set(&mut target, "=4").is_err());
    }

    #[test]
    fn test_layers_override_in_order() {
        let input = ParamsInput {
            inline: Some(r#"{"min": 5, "max": 10}"#.to_string()),
            file: None,
            sets: vec!["max=20".to_string()],
        };
        let defaults = json!({"min": 1, "max": 2, "count": 4});
        let params = input.resolve(Some(&defaults)).unwrap();
        assert_eq!(params.min, Some(5.0));
        assert_eq!(params.max, Some(20.0));
        assert_eq!(params.count, Some(4.0));
    }

    #[test]
    fn test_inline_must_be_an_object() {
        let input = ParamsInput {
            inline: Some("[1, 2]".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            input.resolve(None),
            Err(ParamsInputError::NotAnObject { .. })
        ));
    }
}
