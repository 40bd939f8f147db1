//! Sampling distinct indices without replacement.
//!
//! The population is never materialized when the request is small relative
//! to it: a partial Fisher–Yates runs over a virtual identity array whose
//! displaced entries live in a hash map, so work and memory are
//! `O(amount)`. When more than half of the population is wanted, the
//! complement is drawn instead and the kept indices are shuffled, bounding
//! work by `min(amount, population - amount)` plus the final pass over at
//! most twice the requested amount.

use crate::error::GeneratorError;
use crate::shuffle::shuffle;
use crate::source::RandomSource;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Draw `amount` distinct indices from `0..population`, in random order.
///
/// `amount` is capped at `population`.
pub fn sample_indices<S: RandomSource + ?Sized>(
    source: &mut S,
    population: u64,
    amount: usize,
) -> Result<Vec<u64>, GeneratorError> {
    let amount = (amount as u64).min(population) as usize;
    if amount == 0 {
        return Ok(Vec::new());
    }

    if (amount as u64) * 2 <= population {
        trace!(population, amount, "sparse partial shuffle");
        return partial_shuffle(source, population, amount);
    }

    let unwanted = (population - amount as u64) as usize;
    trace!(population, amount, unwanted, "complement partial shuffle");
    let excluded: HashSet<u64> = partial_shuffle(source, population, unwanted)?
        .into_iter()
        .collect();
    let mut kept: Vec<u64> = (0..population).filter(|i| !excluded.contains(i)).collect();
    shuffle(source, &mut kept)?;
    Ok(kept)
}

/// Partial Fisher–Yates over the virtual array `[0, 1, .., population)`,
/// stopping after `amount` swaps.
fn partial_shuffle<S: RandomSource + ?Sized>(
    source: &mut S,
    population: u64,
    amount: usize,
) -> Result<Vec<u64>, GeneratorError> {
    let mut displaced: HashMap<u64, u64> = HashMap::with_capacity(amount);
    let mut chosen = Vec::with_capacity(amount);
    for i in 0..amount as u64 {
        let j = i + source.uniform_int(population - i)?;
        let at_i = displaced.get(&i).copied().unwrap_or(i);
        let at_j = displaced.get(&j).copied().unwrap_or(j);
        displaced.insert(j, at_i);
        displaced.remove(&i);
        chosen.push(at_j);
    }
    Ok(chosen)
}
