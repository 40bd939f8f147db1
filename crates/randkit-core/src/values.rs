//! Value and result representations for the randkit generation engine.
//!
//! This module defines the values produced by the samplers and the result
//! envelope returned by every `generate` call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single generated value.
///
/// Serialized untagged, so callers see plain JSON numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedValue {
    /// Integer value
    Int(i64),

    /// Floating point value (already rounded for display where relevant)
    Float(f64),

    /// Text value
    Text(String),
}

impl GeneratedValue {
    /// Numeric view of this value; text is parsed when it looks like a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for GeneratedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for GeneratedValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for GeneratedValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for GeneratedValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for GeneratedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// The outcome of one `generate` call.
///
/// A fresh value is created on every call. `formatted` is for display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    /// Generated values, in draw order unless a sort was requested
    pub values: Vec<GeneratedValue>,

    /// Secondary values (lottery bonus pool)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_values: Option<Vec<GeneratedValue>>,

    /// Display-ready rendering of the values
    pub formatted: String,

    /// When the result was produced
    pub timestamp: DateTime<Utc>,

    /// Degradations the caller should show to the user
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Per-mode statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<GenerationMeta>,
}

impl GenerationResult {
    /// Create a result with the given values and rendering, stamped now.
    pub fn new(values: Vec<GeneratedValue>, formatted: impl Into<String>) -> Self {
        Self {
            values,
            bonus_values: None,
            formatted: formatted.into(),
            timestamp: Utc::now(),
            warnings: Vec::new(),
            meta: None,
        }
    }

    pub fn with_bonus_values(mut self, bonus_values: Vec<GeneratedValue>) -> Self {
        self.bonus_values = Some(bonus_values);
        self
    }

    pub fn with_meta(mut self, meta: GenerationMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Append warnings, keeping any already present.
    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Check whether the result carries any warning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Per-mode statistics attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationMeta {
    Range(RangeMeta),
    List(ListMeta),
    Shuffle(ShuffleMeta),
    Secret(SecretMeta),
    Dice(DiceMeta),
    Coin(CoinMeta),
    Lottery(LotteryMeta),
    Ticket(TicketMeta),
    Primitive(PrimitiveMeta),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeMeta {
    /// Number of distinct grid points between min and max
    pub capacity: u64,
    /// True when a unique request could not be satisfied
    pub duplicates_possible: bool,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListMeta {
    /// Items available after blank entries were removed
    pub population: usize,
    pub weighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Vec<GeneratedValue>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShuffleMeta {
    pub population: usize,
}

/// Password strength bucket derived from the entropy estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_bits(bits: f64) -> Self {
        if bits < 40.0 {
            Strength::Weak
        } else if bits < 60.0 {
            Strength::Fair
        } else if bits < 80.0 {
            Strength::Strong
        } else {
            Strength::VeryStrong
        }
    }
}

/// Statistics for passwords and PINs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretMeta {
    /// Distinct characters in the pool actually used
    pub pool_size: usize,
    /// Entropy of one value: `length * log2(pool_size)`
    pub entropy_bits: f64,
    pub strength: Strength,
    /// True when the requested pool was empty and the default pool was used
    pub fallback_pool: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    Advantage,
    Disadvantage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvantageMeta {
    pub mode: RollMode,
    pub kept: i64,
    pub discarded: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiceMeta {
    /// Sum of the numeric (modified) trial values
    pub total: f64,
    pub modifier: f64,
    /// Trial values before the modifier was applied
    pub raw: Vec<GeneratedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advantage: Option<AdvantageMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub label: String,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinMeta {
    /// Count per label, heads first
    pub counts: Vec<LabelCount>,
    pub longest_streak: Streak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolMeta {
    pub min: i64,
    pub max: i64,
    /// Numbers actually drawn (after clamping to the pool size)
    pub pick: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LotteryMeta {
    pub pool_a: PoolMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_b: Option<PoolMeta>,
}

/// Ticket draw bookkeeping; `ticket_remaining` is the bag the caller keeps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketMeta {
    pub ticket_remaining: Vec<GeneratedValue>,
    pub remaining_count: usize,
    pub drawn_count: usize,
    /// The bag is empty; the next call starts again from the full source
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveMeta {
    /// Bits of randomness in each value
    pub bits: u64,
}
