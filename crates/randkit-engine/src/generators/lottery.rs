//! Lottery draws: distinct numbers from a main pool and an optional bonus pool.

use super::{sort_values, Draw};
use crate::error::GeneratorError;
use crate::sample::sample_indices;
use crate::source::RandomSource;
use randkit_core::{
    GeneratedValue, GenerationMeta, LotteryMeta, LotteryParams, PoolMeta, PoolRange, SortOrder,
};

pub fn draw<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &LotteryParams,
) -> Result<Draw, GeneratorError> {
    let mut warnings = Vec::new();
    let (main, main_meta) = draw_pool(source, &params.pool_a, params.sort, "Main pool", &mut warnings)?;

    let mut result = Draw::new(main);
    let bonus_meta = match &params.pool_b {
        Some(pool) => {
            let (bonus, meta) = draw_pool(source, pool, params.sort, "Bonus pool", &mut warnings)?;
            result = result.with_bonus_values(bonus);
            Some(meta)
        }
        None => None,
    };

    Ok(result
        .with_meta(GenerationMeta::Lottery(LotteryMeta {
            pool_a: main_meta,
            pool_b: bonus_meta,
        }))
        .with_warnings(warnings))
}

/// Draw `pool.pick` distinct numbers, clamped to the pool size.
fn draw_pool<S: RandomSource + ?Sized>(
    source: &mut S,
    pool: &PoolRange,
    sort: SortOrder,
    what: &str,
    warnings: &mut Vec<String>,
) -> Result<(Vec<GeneratedValue>, PoolMeta), GeneratorError> {
    let capacity = pool.capacity();
    let mut pick = pool.pick;
    if pick as u64 > capacity {
        warnings.push(format!(
            "{what} has only {capacity} numbers ({} to {}); drawing {capacity} instead of {pick}",
            pool.min, pool.max
        ));
        pick = capacity as usize;
    }

    let mut values: Vec<GeneratedValue> = sample_indices(source, capacity, pick)?
        .into_iter()
        .map(|offset| GeneratedValue::Int(pool.min.wrapping_add(offset as i64)))
        .collect();
    sort_values(&mut values, sort);

    Ok((
        values,
        PoolMeta {
            min: pool.min,
            max: pool.max,
            pick,
        },
    ))
}
