//! Coin flips.

use super::Draw;
use crate::error::GeneratorError;
use crate::source::RandomSource;
use randkit_core::{CoinMeta, CoinParams, GeneratedValue, GenerationMeta, LabelCount, Streak};

pub fn flip<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &CoinParams,
) -> Result<Draw, GeneratorError> {
    let labels = [&params.heads_label, &params.tails_label];
    let mut counts = [0usize; 2];
    let mut sides = Vec::with_capacity(params.flips);
    for _ in 0..params.flips {
        let side = source.uniform_index(2)?;
        counts[side] += 1;
        sides.push(side);
    }

    let (streak_side, streak_length) = longest_run(&sides);
    let values = sides
        .iter()
        .map(|&side| GeneratedValue::Text(labels[side].clone()))
        .collect();

    Ok(Draw::new(values).with_meta(GenerationMeta::Coin(CoinMeta {
        counts: labels
            .iter()
            .zip(counts)
            .map(|(label, count)| LabelCount {
                label: (*label).clone(),
                count,
            })
            .collect(),
        longest_streak: Streak {
            label: labels[streak_side].clone(),
            length: streak_length,
        },
    })))
}

/// The side and length of the longest run; the earliest run wins ties.
fn longest_run(sides: &[usize]) -> (usize, usize) {
    let mut best = (0, 0);
    let mut current = (0, 0);
    for &side in sides {
        if current.1 > 0 && current.0 == side {
            current.1 += 1;
        } else {
            current = (side, 1);
        }
        if current.1 > best.1 {
            best = current;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::ScriptedSource;
    use crate::source::SeededSource;

    fn coin(flips: usize) -> CoinParams {
        CoinParams {
            flips,
            heads_label: "Heads".to_string(),
            tails_label: "Tails".to_string(),
        }
    }

    fn meta(draw: &Draw) -> &CoinMeta {
        match &draw.meta {
            Some(GenerationMeta::Coin(meta)) => meta,
            other => panic!("expected coin meta, got {other:?}"),
        }
    }

    #[test]
    fn test_counts_add_up() {
        let mut source = SeededSource::seeded(42);
        let draw = flip(&mut source, &coin(1000)).unwrap();
        let meta = meta(&draw);
        assert_eq!(meta.counts[0].label, "Heads");
        assert_eq!(meta.counts[1].label, "Tails");
        assert_eq!(meta.counts[0].count + meta.counts[1].count, 1000);
        assert!((400..600).contains(&meta.counts[0].count), "{meta:?}");
    }

    #[test]
    fn test_longest_streak() {
        // low bit picks the side: H T T T H H
        let mut source = ScriptedSource::new(vec![0, 1, 1, 1, 0, 0]);
        let draw = flip(&mut source, &coin(6)).unwrap();
        let labels: Vec<String> = draw.values.iter().map(|v| v.to_string()).collect();
        assert_eq!(labels, vec!["Heads", "Tails", "Tails", "Tails", "Heads", "Heads"]);
        assert_eq!(
            meta(&draw).longest_streak,
            Streak {
                label: "Tails".to_string(),
                length: 3
            }
        );
    }

    #[test]
    fn test_first_longest_streak_wins() {
        assert_eq!(longest_run(&[1, 1, 0, 0]), (1, 2));
        assert_eq!(longest_run(&[0]), (0, 1));
        assert_eq!(longest_run(&[]), (0, 0));
    }

    #[test]
    fn test_custom_labels() {
        let mut source = SeededSource::seeded(42);
        let params = CoinParams {
            flips: 20,
            heads_label: "Yes".to_string(),
            tails_label: "No".to_string(),
        };
        let draw = flip(&mut source, &params).unwrap();
        assert!(draw
            .values
            .iter()
            .all(|v| v.as_str() == Some("Yes") || v.as_str() == Some("No")));
    }
}
