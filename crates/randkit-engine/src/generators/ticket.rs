//! Stateful ticket bag: draws without replacement across calls.
//!
//! The engine keeps no state of its own. Each call returns the bag that is
//! left in `meta.ticket_remaining`; the caller passes it back in as
//! `ticket_remaining` to continue, or omits it to start over.

use super::Draw;
use crate::error::GeneratorError;
use crate::sample::sample_indices;
use crate::source::RandomSource;
use randkit_core::{GeneratedValue, GenerationMeta, TicketMeta, TicketParams, TicketSource};
use std::collections::HashSet;
use tracing::trace;

/// Materialize a fresh bag from the ticket source.
pub fn full_bag(source: &TicketSource) -> Vec<GeneratedValue> {
    match source {
        TicketSource::Items(items) => items.iter().cloned().map(GeneratedValue::Text).collect(),
        TicketSource::Range { min, max } => (*min..=*max).map(GeneratedValue::Int).collect(),
    }
}

pub fn draw<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &TicketParams,
) -> Result<Draw, GeneratorError> {
    let bag = match &params.remaining {
        Some(remaining) => remaining.clone(),
        None => {
            trace!("starting a fresh ticket bag");
            full_bag(&params.source)
        }
    };

    let mut warnings = Vec::new();
    if params.count > bag.len() {
        warnings.push(format!(
            "Only {} tickets left; {} fewer drawn than requested",
            bag.len(),
            params.count - bag.len()
        ));
    }

    let picked = sample_indices(source, bag.len() as u64, params.count)?;
    let taken: HashSet<usize> = picked.iter().map(|&i| i as usize).collect();
    let values: Vec<GeneratedValue> = picked.iter().map(|&i| bag[i as usize].clone()).collect();
    let remaining: Vec<GeneratedValue> = bag
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !taken.contains(i))
        .map(|(_, value)| value)
        .collect();

    let meta = TicketMeta {
        remaining_count: remaining.len(),
        drawn_count: values.len(),
        exhausted: remaining.is_empty(),
        ticket_remaining: remaining,
    };
    Ok(Draw::new(values)
        .with_meta(GenerationMeta::Ticket(meta))
        .with_warnings(warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SeededSource;

    fn range_tickets(min: i64, max: i64, count: usize) -> TicketParams {
        TicketParams {
            remaining: None,
            source: TicketSource::Range { min, max },
            count,
        }
    }

    fn meta(draw: &Draw) -> &TicketMeta {
        match &draw.meta {
            Some(GenerationMeta::Ticket(meta)) => meta,
            other => panic!("expected ticket meta, got {other:?}"),
        }
    }

    #[test]
    fn test_drawn_tickets_leave_the_bag() {
        let mut source = SeededSource::seeded(42);
        let result = draw(&mut source, &range_tickets(1, 10, 3)).unwrap();
        let meta = meta(&result);
        assert_eq!(result.values.len(), 3);
        assert_eq!(meta.remaining_count, 7);
        assert_eq!(meta.drawn_count, 3);
        assert!(!meta.exhausted);
        for value in &result.values {
            assert!(!meta.ticket_remaining.contains(value));
        }
        // order of the untouched tickets is kept
        let rest: Vec<i64> = meta.ticket_remaining.iter().filter_map(|v| v.as_i64()).collect();
        assert!(rest.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bag_carries_over_until_exhausted() {
        let mut source = SeededSource::seeded(42);
        let mut params = range_tickets(1, 5, 2);
        let mut seen = Vec::new();
        for _ in 0..3 {
            let result = draw(&mut source, &params).unwrap();
            seen.extend(result.values.iter().filter_map(|v| v.as_i64()));
            params.remaining = Some(meta(&result).ticket_remaining.clone()).filter(|b| !b.is_empty());
        }
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert!(params.remaining.is_none());
    }

    #[test]
    fn test_asking_for_more_than_left() {
        let mut source = SeededSource::seeded(42);
        let result = draw(&mut source, &range_tickets(1, 5, 10)).unwrap();
        assert_eq!(result.values.len(), 5);
        assert_eq!(result.warnings.len(), 1);
        let meta = meta(&result);
        assert!(meta.exhausted);
        assert!(meta.ticket_remaining.is_empty());
    }

    #[test]
    fn test_item_tickets() {
        let mut source = SeededSource::seeded(42);
        let params = TicketParams {
            remaining: Some(vec!["Bob".into(), "Cy".into()]),
            source: TicketSource::Items(vec!["Ann".into(), "Bob".into(), "Cy".into()]),
            count: 1,
        };
        let result = draw(&mut source, &params).unwrap();
        let name = result.values[0].as_str().unwrap();
        assert!(name == "Bob" || name == "Cy");
        assert_eq!(meta(&result).remaining_count, 1);
    }
}
