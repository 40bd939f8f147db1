//! Weighted index sampling.
//!
//! Weights are clamped to a non-negative floor: negative, NaN and infinite
//! weights count as zero. A zero-weight item is never drawn while any item
//! with positive weight remains.

use crate::error::GeneratorError;
use crate::source::RandomSource;

fn clamp_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Returns true when at least one weight is usable.
pub fn has_positive_weight(weights: &[f64]) -> bool {
    weights.iter().any(|&w| clamp_weight(w) > 0.0)
}

/// Cumulative weights for sampling with replacement.
///
/// Built once; each draw is a binary search, `O(log n)`.
#[derive(Debug, Clone)]
pub struct PrefixSums {
    cumulative: Vec<f64>,
    last_positive: Option<usize>,
}

impl PrefixSums {
    pub fn new(weights: &[f64]) -> Self {
        let mut running = 0.0;
        let mut last_positive = None;
        let cumulative = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let w = clamp_weight(w);
                if w > 0.0 {
                    last_positive = Some(i);
                }
                running += w;
                running
            })
            .collect();
        Self {
            cumulative,
            last_positive,
        }
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Draw one index, or `None` when no weight is positive.
    pub fn sample<S: RandomSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<Option<usize>, GeneratorError> {
        let Some(last_positive) = self.last_positive else {
            return Ok(None);
        };
        let target = source.uniform_float()? * self.total();
        let index = self.cumulative.partition_point(|&c| c <= target);
        Ok(Some(index.min(last_positive)))
    }
}

/// A Fenwick tree over weights for sampling without replacement.
///
/// Both drawing and removing an index cost `O(log n)`, so drawing `k`
/// items from `n` is `O(n + k log n)` instead of rebuilding prefix sums
/// after every draw.
#[derive(Debug, Clone)]
pub struct WeightedBag {
    /// 1-based Fenwick array
    tree: Vec<f64>,
    weights: Vec<f64>,
    positive: usize,
}

impl WeightedBag {
    pub fn new(weights: &[f64]) -> Self {
        let weights: Vec<f64> = weights.iter().map(|&w| clamp_weight(w)).collect();
        let n = weights.len();
        let mut tree = vec![0.0; n + 1];
        for i in 1..=n {
            tree[i] += weights[i - 1];
            let parent = i + (i & i.wrapping_neg());
            if parent <= n {
                tree[parent] += tree[i];
            }
        }
        let positive = weights.iter().filter(|&&w| w > 0.0).count();
        Self {
            tree,
            weights,
            positive,
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of indices still carrying positive weight.
    pub fn positive_remaining(&self) -> usize {
        self.positive
    }

    /// Sum of the remaining weights.
    pub fn total(&self) -> f64 {
        self.prefix(self.len())
    }

    fn prefix(&self, mut i: usize) -> f64 {
        let mut sum = 0.0;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }

    fn add(&mut self, index: usize, delta: f64) {
        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    /// Zero the weight of `index` so it cannot be drawn again.
    pub fn remove(&mut self, index: usize) {
        let weight = self.weights[index];
        if weight > 0.0 {
            self.add(index, -weight);
            self.weights[index] = 0.0;
            self.positive -= 1;
        }
    }

    /// Largest position whose prefix sum is `<= target`, as a 0-based index.
    fn find(&self, mut target: f64) -> usize {
        let n = self.len();
        let mut pos = 0;
        let mut mask = if n == 0 { 0 } else { 1 << (usize::BITS - 1 - n.leading_zeros()) };
        while mask > 0 {
            let next = pos + mask;
            if next <= n && self.tree[next] <= target {
                pos = next;
                target -= self.tree[next];
            }
            mask >>= 1;
        }
        pos
    }

    /// Draw one index proportional to its remaining weight and remove it.
    ///
    /// Returns `None` once no positive weight is left.
    pub fn draw<S: RandomSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<usize>, GeneratorError> {
        if self.positive == 0 {
            return Ok(None);
        }
        let target = source.uniform_float()? * self.total();
        let mut index = self.find(target).min(self.len() - 1);
        if self.weights[index] <= 0.0 {
            // Float drift landed on a spent slot; take the nearest live one.
            index = self.nearest_positive(index);
        }
        self.remove(index);
        Ok(Some(index))
    }

    fn nearest_positive(&self, index: usize) -> usize {
        (index..self.len())
            .chain((0..index).rev())
            .find(|&i| self.weights[i] > 0.0)
            .unwrap_or(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::ScriptedSource;
    use crate::source::SeededSource;
    use std::collections::HashSet;

    #[test]
    fn test_prefix_sums_clamp_bad_weights() {
        let sums = PrefixSums::new(&[1.0, -4.0, f64::NAN, 3.0]);
        assert_eq!(sums.total(), 4.0);
        assert!(!has_positive_weight(&[0.0, -1.0, f64::INFINITY]));
        assert!(has_positive_weight(&[0.0, 0.5]));
    }

    #[test]
    fn test_prefix_sums_skip_zero_weights() {
        let sums = PrefixSums::new(&[0.0, 1.0, 0.0]);
        let mut source = SeededSource::seeded(42);
        for _ in 0..200 {
            assert_eq!(sums.sample(&mut source).unwrap(), Some(1));
        }
        assert_eq!(PrefixSums::new(&[0.0, 0.0]).sample(&mut source).unwrap(), None);
    }

    #[test]
    fn test_prefix_sums_top_of_range() {
        // The largest float below 1.0 must still land on the last live item.
        let sums = PrefixSums::new(&[1.0, 1.0, 0.0]);
        let mut source = ScriptedSource::new(vec![u64::MAX]);
        assert_eq!(sums.sample(&mut source).unwrap(), Some(1));
    }

    #[test]
    fn test_prefix_sums_distribution() {
        let sums = PrefixSums::new(&[1.0, 2.0, 7.0]);
        let mut source = SeededSource::seeded(7);
        let mut hits = [0usize; 3];
        for _ in 0..10_000 {
            hits[sums.sample(&mut source).unwrap().unwrap()] += 1;
        }
        assert!((800..1200).contains(&hits[0]), "{hits:?}");
        assert!((1750..2250).contains(&hits[1]), "{hits:?}");
        assert!((6600..7400).contains(&hits[2]), "{hits:?}");
    }

    #[test]
    fn test_bag_totals_track_removals() {
        let mut bag = WeightedBag::new(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(bag.total(), 15.0);
        bag.remove(2);
        assert_eq!(bag.total(), 12.0);
        bag.remove(2);
        assert_eq!(bag.total(), 12.0);
        assert_eq!(bag.positive_remaining(), 4);
    }

    #[test]
    fn test_bag_find() {
        let bag = WeightedBag::new(&[1.0, 0.0, 2.0, 3.0]);
        assert_eq!(bag.find(0.0), 0);
        assert_eq!(bag.find(0.99), 0);
        assert_eq!(bag.find(1.0), 2);
        assert_eq!(bag.find(2.5), 2);
        assert_eq!(bag.find(3.0), 3);
        assert_eq!(bag.find(5.99), 3);
    }

    #[test]
    fn test_bag_draws_each_positive_index_once() {
        let mut bag = WeightedBag::new(&[5.0, 0.0, 1.0, 0.25, 9.0, 0.0]);
        let mut source = SeededSource::seeded(42);
        let mut drawn = HashSet::new();
        while let Some(index) = bag.draw(&mut source).unwrap() {
            assert!(drawn.insert(index), "index {index} drawn twice");
        }
        assert_eq!(drawn, HashSet::from([0, 2, 3, 4]));
        assert_eq!(bag.total(), 0.0);
    }

    #[test]
    fn test_bag_prefers_heavy_items_first() {
        let mut source = SeededSource::seeded(11);
        let mut heavy_first = 0;
        for _ in 0..2000 {
            let mut bag = WeightedBag::new(&[1.0, 9.0]);
            if bag.draw(&mut source).unwrap() == Some(1) {
                heavy_first += 1;
            }
        }
        assert!((1700..1900).contains(&heavy_first), "{heavy_first}");
    }

    #[test]
    fn test_large_bag() {
        let weights: Vec<f64> = (0..50_000).map(|i| (i % 7) as f64).collect();
        let mut bag = WeightedBag::new(&weights);
        let mut source = SeededSource::seeded(3);
        let mut drawn = HashSet::new();
        for _ in 0..5_000 {
            let index = bag.draw(&mut source).unwrap().unwrap();
            assert!(weights[index] > 0.0);
            assert!(drawn.insert(index));
        }
    }
}
