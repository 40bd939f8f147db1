//! Picking from an item list, weighted or not, with or without replacement.

use super::weighted::{has_positive_weight, PrefixSums, WeightedBag};
use super::{sort_values, Draw};
use crate::error::GeneratorError;
use crate::sample::sample_indices;
use crate::shuffle::shuffle;
use crate::source::RandomSource;
use randkit_core::{GeneratedValue, GenerationMeta, ListMeta, ListParams, ShuffleMeta, ShuffleParams};
use tracing::trace;

/// Pick `count` items.
pub fn pick<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &ListParams,
) -> Result<Draw, GeneratorError> {
    let population = params.items.len();
    let mut warnings = Vec::new();

    if population == 0 {
        warnings.push("No items to pick from".to_string());
        return Ok(Draw::new(Vec::new())
            .with_meta(GenerationMeta::List(ListMeta {
                population,
                weighted: false,
                groups: None,
            }))
            .with_warnings(warnings));
    }

    let weights = match params.weights.as_deref() {
        Some(weights) if has_positive_weight(weights) => Some(weights),
        Some(_) => {
            warnings.push("All weights are zero; picking uniformly".to_string());
            None
        }
        None => None,
    };

    let mut amount = params.count;
    if params.unique && amount > population {
        warnings.push(format!(
            "Only {population} unique items available; returning each of them once"
        ));
        amount = population;
    }

    let indices = match (weights, params.unique) {
        (None, true) => sample_indices(source, population as u64, amount)?
            .into_iter()
            .map(|i| i as usize)
            .collect(),
        (None, false) => (0..amount)
            .map(|_| source.uniform_index(population))
            .collect::<Result<Vec<_>, _>>()?,
        (Some(weights), true) => weighted_without_replacement(source, weights, amount)?,
        (Some(weights), false) => weighted_with_replacement(source, weights, amount)?,
    };

    let mut values: Vec<GeneratedValue> = indices
        .into_iter()
        .map(|i| GeneratedValue::Text(params.items[i].clone()))
        .collect();
    sort_values(&mut values, params.sort);

    let groups: Option<Vec<Vec<GeneratedValue>>> = params
        .group_size
        .map(|size| values.chunks(size.max(1)).map(<[_]>::to_vec).collect());

    Ok(Draw::new(values)
        .with_meta(GenerationMeta::List(ListMeta {
            population,
            weighted: weights.is_some(),
            groups,
        }))
        .with_warnings(warnings))
}

fn weighted_with_replacement<S: RandomSource + ?Sized>(
    source: &mut S,
    weights: &[f64],
    amount: usize,
) -> Result<Vec<usize>, GeneratorError> {
    let sums = PrefixSums::new(weights);
    let mut picks = Vec::with_capacity(amount);
    for _ in 0..amount {
        match sums.sample(source)? {
            Some(index) => picks.push(index),
            None => break,
        }
    }
    Ok(picks)
}

/// Draw distinct indices proportional to weight. Once every positive
/// weight is used up, the rest are drawn uniformly from the zero-weight
/// items.
fn weighted_without_replacement<S: RandomSource + ?Sized>(
    source: &mut S,
    weights: &[f64],
    amount: usize,
) -> Result<Vec<usize>, GeneratorError> {
    trace!(population = weights.len(), amount, "Fenwick weighted draw");
    let mut bag = WeightedBag::new(weights);
    let mut picks = Vec::with_capacity(amount);
    while picks.len() < amount {
        match bag.draw(source)? {
            Some(index) => picks.push(index),
            None => break,
        }
    }

    if picks.len() < amount {
        trace!(
            weighted = picks.len(),
            uniform = amount - picks.len(),
            "positive weight exhausted"
        );
        let mut taken = vec![false; weights.len()];
        for &index in &picks {
            taken[index] = true;
        }
        let leftover: Vec<usize> = (0..weights.len()).filter(|&i| !taken[i]).collect();
        let extra = sample_indices(source, leftover.len() as u64, amount - picks.len())?;
        picks.extend(extra.into_iter().map(|i| leftover[i as usize]));
    }
    Ok(picks)
}

/// Return every item in a uniformly random order.
pub fn shuffle_items<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &ShuffleParams,
) -> Result<Draw, GeneratorError> {
    let mut values: Vec<GeneratedValue> = params
        .items
        .iter()
        .map(|item| GeneratedValue::Text(item.clone()))
        .collect();
    shuffle(source, &mut values)?;

    let mut warnings = Vec::new();
    if values.is_empty() {
        warnings.push("No items to shuffle".to_string());
    }

    Ok(Draw::new(values)
        .with_meta(GenerationMeta::Shuffle(ShuffleMeta {
            population: params.items.len(),
        }))
        .with_warnings(warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SeededSource;
    use randkit_core::SortOrder;
    use std::collections::{HashMap, HashSet};

    fn list(items: &[&str], weights: Option<Vec<f64>>, count: usize, unique: bool) -> ListParams {
        ListParams {
            items: items.iter().map(|s| s.to_string()).collect(),
            weights,
            count,
            unique,
            group_size: None,
            sort: SortOrder::None,
        }
    }

    fn texts(draw: &Draw) -> Vec<String> {
        draw.values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_unique_pick() {
        let mut source = SeededSource::seeded(42);
        let items: Vec<String> = (0..100).map(|i| format!("item{i}")).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let draw = pick(&mut source, &list(&refs, None, 60, true)).unwrap();
        let picked: HashSet<String> = texts(&draw).into_iter().collect();
        assert_eq!(picked.len(), 60);
        assert!(draw.warnings.is_empty());
    }

    #[test]
    fn test_unique_pick_more_than_available() {
        let mut source = SeededSource::seeded(42);
        let draw = pick(&mut source, &list(&["a", "b", "c"], None, 5, true)).unwrap();
        let mut picked = texts(&draw);
        picked.sort();
        assert_eq!(picked, vec!["a", "b", "c"]);
        assert_eq!(draw.warnings.len(), 1);
    }

    #[test]
    fn test_pick_with_replacement() {
        let mut source = SeededSource::seeded(42);
        let draw = pick(&mut source, &list(&["x", "y"], None, 40, false)).unwrap();
        assert_eq!(draw.values.len(), 40);
        let distinct: HashSet<String> = texts(&draw).into_iter().collect();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn test_weighted_skew() {
        let mut source = SeededSource::seeded(42);
        let draw = pick(
            &mut source,
            &list(&["A", "B", "C"], Some(vec![1.0, 2.0, 7.0]), 5000, false),
        )
        .unwrap();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for item in texts(&draw) {
            *counts.entry(item).or_default() += 1;
        }
        assert!(counts["C"] > 3000, "{counts:?}");
        assert!(counts["A"] < 800, "{counts:?}");
    }

    #[test]
    fn test_weighted_unique_then_zero_weight_items() {
        let mut source = SeededSource::seeded(42);
        let draw = pick(
            &mut source,
            &list(&["A", "B", "C", "D"], Some(vec![0.0, 3.0, 0.0, -1.0]), 3, true),
        )
        .unwrap();
        let picked = texts(&draw);
        assert_eq!(picked[0], "B");
        let distinct: HashSet<&String> = picked.iter().collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_all_zero_weights_degrade_to_uniform() {
        let mut source = SeededSource::seeded(42);
        let draw = pick(
            &mut source,
            &list(&["A", "B"], Some(vec![0.0, 0.0]), 100, false),
        )
        .unwrap();
        assert_eq!(draw.values.len(), 100);
        assert_eq!(draw.warnings, vec!["All weights are zero; picking uniformly"]);
        let Some(GenerationMeta::List(meta)) = draw.meta else {
            panic!("expected list meta");
        };
        assert!(!meta.weighted);
    }

    #[test]
    fn test_empty_list_returns_no_values() {
        let mut source = SeededSource::seeded(42);
        let draw = pick(&mut source, &list(&[], None, 3, true)).unwrap();
        assert!(draw.values.is_empty());
    }

    #[test]
    fn test_grouping_is_formatting_only() {
        let mut source = SeededSource::seeded(42);
        let mut params = list(&["a", "b", "c", "d", "e", "f", "g"], None, 7, true);
        params.group_size = Some(3);
        let draw = pick(&mut source, &params).unwrap();
        let Some(GenerationMeta::List(meta)) = &draw.meta else {
            panic!("expected list meta");
        };
        let groups = meta.groups.as_ref().unwrap();
        assert_eq!(groups.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 3, 1]);
        assert_eq!(groups.concat(), draw.values);
    }

    #[test]
    fn test_shuffle_keeps_every_item() {
        let mut source = SeededSource::seeded(42);
        let items: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let draw = shuffle_items(&mut source, &ShuffleParams { items: items.clone() }).unwrap();
        let mut shuffled = texts(&draw);
        assert_ne!(shuffled, items);
        shuffled.sort_by_key(|s| s.parse::<u32>().unwrap());
        assert_eq!(shuffled, items);
    }
}
