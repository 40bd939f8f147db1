//! Dice rolls.

use super::{summarize, Draw};
use crate::error::GeneratorError;
use crate::source::RandomSource;
use randkit_core::{AdvantageMeta, DiceMeta, DiceParams, GeneratedValue, GenerationMeta, RollMode};

/// Roll the dice described by `params`.
///
/// Numeric faces get `modifier` added per trial; text faces are kept as-is
/// and do not count towards the total.
pub fn roll<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &DiceParams,
) -> Result<Draw, GeneratorError> {
    let mut warnings = Vec::new();
    let faces = params.custom_faces.as_deref().filter(|faces| !faces.is_empty());
    let roll_mode = roll_mode(params, faces.is_some(), &mut warnings);
    let modifier = params.modifier as i64;

    let mut raw = Vec::with_capacity(params.rolls);
    let mut advantage = None;
    match (faces, roll_mode) {
        (Some(faces), _) => {
            for _ in 0..params.rolls {
                let face = &faces[source.uniform_index(faces.len())?];
                raw.push(parse_face(face));
            }
        }
        (None, Some(mode)) => {
            let first = roll_die(source, params.sides)?;
            let second = roll_die(source, params.sides)?;
            let (kept, discarded) = match mode {
                RollMode::Advantage => (first.max(second), first.min(second)),
                RollMode::Disadvantage => (first.min(second), first.max(second)),
            };
            raw.push(GeneratedValue::Int(kept));
            advantage = Some(AdvantageMeta {
                mode,
                kept,
                discarded,
            });
        }
        (None, None) => {
            for _ in 0..params.rolls {
                raw.push(GeneratedValue::Int(roll_die(source, params.sides)?));
            }
        }
    }

    let values: Vec<GeneratedValue> = raw.iter().map(|v| apply_modifier(v, modifier)).collect();
    let numeric: Vec<GeneratedValue> = values
        .iter()
        .filter(|v| !matches!(v, GeneratedValue::Text(_)))
        .cloned()
        .collect();
    let summary = summarize(&numeric);

    Ok(Draw::new(values)
        .with_meta(GenerationMeta::Dice(DiceMeta {
            total: summary.as_ref().map_or(0.0, |s| s.sum),
            modifier: params.modifier,
            raw,
            min: summary.as_ref().map(|s| s.min),
            max: summary.as_ref().map(|s| s.max),
            average: summary.as_ref().map(|s| s.average),
            advantage,
        }))
        .with_warnings(warnings))
}

fn roll_die<S: RandomSource + ?Sized>(source: &mut S, sides: u64) -> Result<i64, GeneratorError> {
    Ok(source.uniform_int(sides)? as i64 + 1)
}

/// Advantage and disadvantage only apply to one plain d20 roll.
fn roll_mode(
    params: &DiceParams,
    custom_faces: bool,
    warnings: &mut Vec<String>,
) -> Option<RollMode> {
    let requested = match (params.advantage, params.disadvantage) {
        (false, false) => return None,
        (true, true) => {
            warnings.push("Advantage and disadvantage cancel out; rolling normally".to_string());
            return None;
        }
        (true, false) => RollMode::Advantage,
        (false, true) => RollMode::Disadvantage,
    };
    if !custom_faces && params.sides == 20 && params.rolls == 1 {
        Some(requested)
    } else {
        warnings.push("Advantage and disadvantage only apply to a single d20 roll".to_string());
        None
    }
}

fn parse_face(face: &str) -> GeneratedValue {
    if let Ok(n) = face.trim().parse::<i64>() {
        return GeneratedValue::Int(n);
    }
    match face.trim().parse::<f64>() {
        Ok(f) if f.is_finite() => GeneratedValue::Float(f),
        _ => GeneratedValue::Text(face.to_string()),
    }
}

fn apply_modifier(value: &GeneratedValue, modifier: i64) -> GeneratedValue {
    match value {
        GeneratedValue::Int(n) => GeneratedValue::Int(n.saturating_add(modifier)),
        GeneratedValue::Float(f) => GeneratedValue::Float(f + modifier as f64),
        other => other.clone(),
    }
}
