//! The tolerant parameter bag accepted at the engine boundary.
//!
//! `GeneratorParams` carries the fields of every mode at once. Callers
//! (form state, URL parameters, config files) hand over whatever they have;
//! fields that do not apply to the requested mode are ignored, unknown keys
//! are ignored, and values of the wrong shape are coerced when possible or
//! treated as absent otherwise. Nothing in this module rejects a bag because
//! of its content; only documents that are not valid JSON/YAML fail to load.
//!
//! Use [`GeneratorParams::project`](crate::modes) to turn the bag into the
//! typed parameters of a single mode.

use crate::values::GeneratedValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for loading parameter documents.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    /// Error reading a parameter file
    #[error("Failed to read parameter file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing JSON
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// One numeric pool of a lottery draw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSpec {
    /// Smallest number in the pool (inclusive)
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Largest number in the pool (inclusive)
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// How many distinct numbers to draw from the pool
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub pick: Option<f64>,
}

impl PoolSpec {
    /// Create a pool spec with all fields set.
    pub fn new(min: f64, max: f64, pick: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            pick: Some(pick),
        }
    }
}

/// Superset parameter bag for every generator mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    // ------------------------------------------------------------------
    // Numeric grid (range, ticket source)
    // ------------------------------------------------------------------
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    /// Decimal digits used when displaying range values
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,

    /// Number of values requested (meaning depends on mode)
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    /// `asc`, `desc` or `none`
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    // ------------------------------------------------------------------
    // Item lists (list, shuffle, ticket source)
    // ------------------------------------------------------------------
    #[serde(deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,

    /// Weights parallel to `items`
    #[serde(deserialize_with = "lenient::weight_list", skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,

    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub group_size: Option<f64>,

    // ------------------------------------------------------------------
    // Passwords and PINs
    // ------------------------------------------------------------------
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub uppercase: Option<bool>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub digits: Option<bool>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub symbols: Option<bool>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub exclude_ambiguous: Option<bool>,

    /// Characters removed from the password pool
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub ensure_each: Option<bool>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub grouping: Option<bool>,

    // ------------------------------------------------------------------
    // Dice
    // ------------------------------------------------------------------
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub sides: Option<f64>,

    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub rolls: Option<f64>,

    #[serde(deserialize_with = "lenient::text_list", skip_serializing_if = "Option::is_none")]
    pub custom_faces: Option<Vec<String>>,

    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub dice_modifier: Option<f64>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub advantage: Option<bool>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub disadvantage: Option<bool>,

    // ------------------------------------------------------------------
    // Coin
    // ------------------------------------------------------------------
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub flips: Option<f64>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub heads_label: Option<String>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub tails_label: Option<String>,

    // ------------------------------------------------------------------
    // Lottery
    // ------------------------------------------------------------------
    #[serde(deserialize_with = "lenient::pool", skip_serializing_if = "Option::is_none")]
    pub pool_a: Option<PoolSpec>,

    #[serde(deserialize_with = "lenient::pool", skip_serializing_if = "Option::is_none")]
    pub pool_b: Option<PoolSpec>,

    // ------------------------------------------------------------------
    // Ticket
    // ------------------------------------------------------------------
    /// Caller-held bag from the previous ticket draw
    #[serde(deserialize_with = "lenient::value_list", skip_serializing_if = "Option::is_none")]
    pub ticket_remaining: Option<Vec<GeneratedValue>>,

    // ------------------------------------------------------------------
    // UUID / bytes
    // ------------------------------------------------------------------
    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub uuid_hyphens: Option<bool>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub uuid_uppercase: Option<bool>,

    /// `hex`, `base64` or `array`
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub byte_encoding: Option<String>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub hex_prefix: Option<bool>,

    #[serde(deserialize_with = "lenient::flag", skip_serializing_if = "Option::is_none")]
    pub hex_uppercase: Option<bool>,
}

impl GeneratorParams {
    /// Parse a parameter bag from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a parameter bag from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParamsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build a parameter bag from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ParamsError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load a parameter bag from a file; `.yaml`/`.yml` files are read as
    /// YAML, everything else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParamsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }
}

/// Deserializers that coerce loosely-typed input and never fail on content.
mod lenient {
    use crate::params::PoolSpec;
    use crate::values::GeneratedValue;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(coerce_f64))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(coerce_bool))
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(coerce_text))
    }

    pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Array(values)) => Some(values.iter().filter_map(coerce_text).collect()),
            Some(Value::String(s)) => Some(split_items(&s)),
            _ => None,
        })
    }

    pub fn weight_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<f64>>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Array(values)) => Some(
                values
                    .iter()
                    .map(|v| coerce_f64(v).unwrap_or(0.0))
                    .collect(),
            ),
            Some(Value::String(s)) => Some(
                s.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|part| !part.is_empty())
                    .map(|part| part.parse::<f64>().unwrap_or(0.0))
                    .collect(),
            ),
            _ => None,
        })
    }

    pub fn value_list<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Vec<GeneratedValue>>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::Array(values)) => Some(values.iter().filter_map(coerce_value).collect()),
            Some(Value::String(s)) => Some(split_items(&s).into_iter().map(GeneratedValue::Text).collect()),
            _ => None,
        })
    }

    pub fn pool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<PoolSpec>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
            _ => None,
        })
    }

    fn coerce_f64(value: &Value) -> Option<f64> {
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        };
        number.filter(|n| n.is_finite())
    }

    fn coerce_bool(value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|n| n != 0.0),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" | "" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    fn coerce_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn coerce_value(value: &Value) -> Option<GeneratedValue> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(GeneratedValue::Int(i)),
                None => n.as_f64().map(GeneratedValue::Float),
            },
            Value::String(s) => Some(GeneratedValue::Text(s.clone())),
            Value::Bool(b) => Some(GeneratedValue::Text(b.to_string())),
            _ => None,
        }
    }

    /// Split a free-form item string: one item per line, or comma separated
    /// when the text has no line breaks.
    fn split_items(s: &str) -> Vec<String> {
        if s.contains('\n') {
            s.lines().map(str::to_string).collect()
        } else {
            s.split(',').map(str::to_string).collect()
        }
    }
}
