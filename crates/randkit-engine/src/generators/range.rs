//! Numeric grid sampling.
//!
//! Values live on the grid `min, min + step, ..` up to `max`. Sampling
//! happens in grid-index space; rounding to the display precision is applied
//! only when an index is turned into a value, so uniqueness is decided on
//! indices rather than on rounded numbers.

use super::{sort_values, summarize, Draw};
use crate::error::GeneratorError;
use crate::sample::sample_indices;
use crate::source::RandomSource;
use randkit_core::{GeneratedValue, GenerationMeta, RangeMeta, RangeParams};

/// Largest grid size whose indices map exactly onto f64 values.
const MAX_GRID: u64 = 1 << 53;

/// Tolerance for grids whose span is a float multiple of the step.
const GRID_EPSILON: f64 = 1e-9;

/// Number of grid points: `floor((max - min) / step) + 1`.
pub fn grid_capacity(params: &RangeParams) -> u64 {
    let cells = ((params.max - params.min) / params.step + GRID_EPSILON).floor();
    if cells.is_nan() || cells < 0.0 {
        return 1;
    }
    if cells >= (MAX_GRID - 1) as f64 {
        return MAX_GRID;
    }
    cells as u64 + 1
}

/// The display value of grid point `index`.
pub fn grid_value(params: &RangeParams, index: u64) -> GeneratedValue {
    let raw = (params.min + index as f64 * params.step).min(params.max);
    let scale = 10f64.powi(params.precision as i32);
    let rounded = (raw * scale).round() / scale;
    if params.precision == 0 && rounded.abs() < i64::MAX as f64 {
        GeneratedValue::Int(rounded as i64)
    } else {
        GeneratedValue::Float(rounded)
    }
}

/// Draw `count` grid values.
pub fn generate<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &RangeParams,
) -> Result<Draw, GeneratorError> {
    let capacity = grid_capacity(params);
    let mut warnings = Vec::new();
    let infeasible = params.unique && params.count as u64 > capacity;

    let indices = if !params.unique {
        (0..params.count)
            .map(|_| source.uniform_int(capacity))
            .collect::<Result<Vec<_>, _>>()?
    } else if !infeasible {
        sample_indices(source, capacity, params.count)?
    } else {
        warnings.push(format!(
            "Only {capacity} unique values exist between {} and {}; the remaining {} may repeat",
            params.min,
            params.max,
            params.count as u64 - capacity
        ));
        // capacity < count here, so the whole grid is small
        let mut indices = sample_indices(source, capacity, capacity as usize)?;
        while indices.len() < params.count {
            indices.push(source.uniform_int(capacity)?);
        }
        indices
    };

    let mut values: Vec<GeneratedValue> = indices
        .into_iter()
        .map(|index| grid_value(params, index))
        .collect();
    sort_values(&mut values, params.sort);

    let meta = match summarize(&values) {
        Some(summary) => RangeMeta {
            capacity,
            duplicates_possible: infeasible,
            min: summary.min,
            max: summary.max,
            sum: summary.sum,
            average: summary.average,
        },
        None => RangeMeta {
            capacity,
            duplicates_possible: infeasible,
            min: 0.0,
            max: 0.0,
            sum: 0.0,
            average: 0.0,
        },
    };

    Ok(Draw::new(values)
        .with_meta(GenerationMeta::Range(meta))
        .with_warnings(warnings))
}
