//! Display rendering of a draw.
//!
//! The `formatted` string is for people. Nothing downstream parses it.

use crate::generators::password::group_chars;
use crate::generators::Draw;
use randkit_core::{GeneratedValue, GenerationMeta, ModeParams};

/// Render the values of `draw` the way its mode displays them.
pub fn render(params: &ModeParams, draw: &Draw) -> String {
    match params {
        ModeParams::Range(_) | ModeParams::Ticket(_) => join(&draw.values, ", "),
        ModeParams::List(_) => match &draw.meta {
            Some(GenerationMeta::List(meta)) if meta.groups.is_some() => meta
                .groups
                .iter()
                .flatten()
                .enumerate()
                .map(|(i, group)| format!("Group {}: {}", i + 1, join(group, ", ")))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => join(&draw.values, ", "),
        },
        ModeParams::Lottery(_) => {
            let main = join(&draw.values, ", ");
            match &draw.bonus_values {
                Some(bonus) if !bonus.is_empty() => format!("{main} | bonus: {}", join(bonus, ", ")),
                _ => main,
            }
        }
        ModeParams::Password(p) if p.grouping => grouped_lines(&draw.values),
        ModeParams::Pin(p) if p.grouping => grouped_lines(&draw.values),
        ModeParams::Shuffle(_)
        | ModeParams::Password(_)
        | ModeParams::Pin(_)
        | ModeParams::Uuid(_)
        | ModeParams::Bytes(_)
        | ModeParams::Color(_) => join(&draw.values, "\n"),
        ModeParams::Dice(_) => {
            let rolls = join(&draw.values, ", ");
            match &draw.meta {
                Some(GenerationMeta::Dice(meta)) => {
                    format!("{rolls} (total {})", format_number(meta.total))
                }
                _ => rolls,
            }
        }
        ModeParams::Coin(_) => join(&draw.values, ", "),
    }
}

fn join(values: &[GeneratedValue], separator: &str) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

fn grouped_lines(values: &[GeneratedValue]) -> String {
    values
        .iter()
        .map(|value| group_chars(&value.to_string(), '-'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whole numbers print without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
