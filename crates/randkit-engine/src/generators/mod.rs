//! Per-mode samplers.
//!
//! Each sampler takes the typed parameters of its mode and returns a
//! [`Draw`]: the values plus meta and warnings. Rendering the `formatted`
//! string is left to the result assembler.

pub mod coin;
pub mod dice;
pub mod list;
pub mod lottery;
pub mod password;
pub mod primitive;
pub mod range;
pub mod ticket;
pub mod weighted;

use randkit_core::{GeneratedValue, GenerationMeta, SortOrder};
use std::cmp::Ordering;

/// Raw output of one sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub values: Vec<GeneratedValue>,
    pub bonus_values: Option<Vec<GeneratedValue>>,
    pub meta: Option<GenerationMeta>,
    pub warnings: Vec<String>,
}

impl Draw {
    pub fn new(values: Vec<GeneratedValue>) -> Self {
        Self {
            values,
            bonus_values: None,
            meta: None,
            warnings: Vec::new(),
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

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

/// Apply the final ordering pass.
///
/// Numbers compare numerically; text that does not parse as a number
/// sorts after numbers, alphabetically.
pub fn sort_values(values: &mut [GeneratedValue], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::Asc => values.sort_by(compare_values),
        SortOrder::Desc => values.sort_by(|a, b| compare_values(b, a)),
    }
}

fn compare_values(a: &GeneratedValue, b: &GeneratedValue) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}

/// Sum, minimum, maximum and mean of the numeric values.
pub(crate) struct NumericSummary {
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

pub(crate) fn summarize(values: &[GeneratedValue]) -> Option<NumericSummary> {
    let numbers: Vec<f64> = values.iter().filter_map(GeneratedValue::as_f64).collect();
    if numbers.is_empty() {
        return None;
    }
    let sum: f64 = numbers.iter().sum();
    Some(NumericSummary {
        sum,
        min: numbers.iter().copied().fold(f64::INFINITY, f64::min),
        max: numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        average: sum / numbers.len() as f64,
    })
}
