//! Unbiased in-place permutation.

use crate::error::GeneratorError;
use crate::source::RandomSource;

/// Fisher–Yates shuffle over the whole slice.
///
/// Walks from the last index down to 1, swapping each position with a
/// uniformly chosen position at or below it.
pub fn shuffle<T, S: RandomSource + ?Sized>(
    source: &mut S,
    items: &mut [T],
) -> Result<(), GeneratorError> {
    for i in (1..items.len()).rev() {
        let j = source.uniform_index(i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::FailingSource;
    use crate::source::SeededSource;
    use std::collections::HashMap;

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut source = SeededSource::seeded(42);
        let mut items: Vec<u32> = (0..500).collect();
        shuffle(&mut source, &mut items).unwrap();

        assert_ne!(items, (0..500).collect::<Vec<_>>());
        items.sort_unstable();
        assert_eq!(items, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn test_trivial_slices() {
        let mut source = FailingSource;
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut source, &mut empty).unwrap();
        let mut single = vec!['a'];
        shuffle(&mut source, &mut single).unwrap();
        assert_eq!(single, vec!['a']);
    }

    #[test]
    fn test_all_orderings_appear_evenly() {
        let mut source = SeededSource::seeded(3);
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..6000 {
            let mut items = vec![1u8, 2, 3];
            shuffle(&mut source, &mut items).unwrap();
            *seen.entry(items).or_default() += 1;
        }
        assert_eq!(seen.len(), 6);
        for count in seen.values() {
            assert!((800..1200).contains(count), "skewed permutation count {count}");
        }
    }

    #[test]
    fn test_failure_propagates() {
        let mut items = vec![1, 2, 3];
        assert!(shuffle(&mut FailingSource, &mut items).is_err());
    }
}
