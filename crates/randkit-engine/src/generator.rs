//! The generation entry point: project, dispatch, render.

use crate::error::GeneratorError;
use crate::format::render;
use crate::generators::{coin, dice, list, lottery, password, primitive, range, ticket, Draw};
use crate::source::{OsSource, RandomSource, SeededSource};
use randkit_core::{GenerationResult, GeneratorMode, GeneratorParams, ModeParams};
use tracing::{debug, warn};

/// Generate one batch with the operating system CSPRNG.
///
/// This is the whole contract consumed by callers. No state survives the
/// call; ticket bags travel in and out through the params and the result.
pub fn generate(
    mode: GeneratorMode,
    params: &GeneratorParams,
) -> Result<GenerationResult, GeneratorError> {
    generate_with(&mut OsSource::os(), mode, params)
}

/// Generate one batch drawing from `source`.
pub fn generate_with<S: RandomSource + ?Sized>(
    source: &mut S,
    mode: GeneratorMode,
    params: &GeneratorParams,
) -> Result<GenerationResult, GeneratorError> {
    let projected = params.project(mode);
    debug!(%mode, requested = projected.params.requested(), "Generating");

    let draw = dispatch(source, &projected.params)?;
    let formatted = render(&projected.params, &draw);

    let Draw {
        values,
        bonus_values,
        meta,
        warnings,
    } = draw;
    let warnings: Vec<String> = projected.warnings.into_iter().chain(warnings).collect();
    for warning in &warnings {
        warn!(%mode, "{warning}");
    }
    debug!(
        %mode,
        produced = values.len(),
        warnings = warnings.len(),
        "Generation finished"
    );

    let mut result = GenerationResult::new(values, formatted).with_warnings(warnings);
    if let Some(bonus_values) = bonus_values {
        result = result.with_bonus_values(bonus_values);
    }
    if let Some(meta) = meta {
        result = result.with_meta(meta);
    }
    Ok(result)
}

fn dispatch<S: RandomSource + ?Sized>(
    source: &mut S,
    params: &ModeParams,
) -> Result<Draw, GeneratorError> {
    match params {
        ModeParams::Range(p) => range::generate(source, p),
        ModeParams::List(p) => list::pick(source, p),
        ModeParams::Shuffle(p) => list::shuffle_items(source, p),
        ModeParams::Password(p) => password::passwords(source, p),
        ModeParams::Pin(p) => password::pins(source, p),
        ModeParams::Dice(p) => dice::roll(source, p),
        ModeParams::Coin(p) => coin::flip(source, p),
        ModeParams::Lottery(p) => lottery::draw(source, p),
        ModeParams::Ticket(p) => ticket::draw(source, p),
        ModeParams::Uuid(p) => primitive::uuids(source, p),
        ModeParams::Bytes(p) => primitive::blobs(source, p),
        ModeParams::Color(p) => primitive::colors(source, p),
    }
}

/// A generator bound to one random source.
///
/// Handy when many batches are drawn from the same seeded stream.
pub struct Generator<S> {
    source: S,
}

impl<S: RandomSource> Generator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn generate(
        &mut self,
        mode: GeneratorMode,
        params: &GeneratorParams,
    ) -> Result<GenerationResult, GeneratorError> {
        generate_with(&mut self.source, mode, params)
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl Generator<OsSource> {
    /// Generator backed by the operating system CSPRNG.
    pub fn secure() -> Self {
        Self::new(OsSource::os())
    }
}

impl Generator<SeededSource> {
    /// Reproducible generator; the same seed yields the same results.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededSource::seeded(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::FailingSource;
    use randkit_core::{GeneratedValue, GenerationMeta};

    fn params(json: &str) -> GeneratorParams {
        GeneratorParams::from_json(json).unwrap()
    }

    #[test]
    fn test_every_mode_generates() {
        let bag = params(r#"{"items": ["a", "b", "c"], "count": 2}"#);
        let mut generator = Generator::seeded(42);
        for mode in GeneratorMode::ALL {
            let result = generator.generate(mode, &bag).unwrap();
            assert!(!result.values.is_empty(), "{mode} produced nothing");
            assert!(!result.formatted.is_empty(), "{mode} rendered nothing");
            assert!(result.meta.is_some(), "{mode} has no meta");
        }
    }

    #[test]
    fn test_seeded_generators_repeat() {
        let bag = params(r#"{"min": 1, "max": 1000000, "count": 20}"#);
        let a = Generator::seeded(9).generate(GeneratorMode::Range, &bag).unwrap();
        let b = Generator::seeded(9).generate(GeneratorMode::Range, &bag).unwrap();
        assert_eq!(a.values, b.values);
        assert_eq!(a.formatted, b.formatted);
    }

    #[test]
    fn test_projection_warnings_come_first() {
        let bag = params(r#"{"min": 1, "max": 3, "count": 50000, "unique": true}"#);
        let result = Generator::seeded(1).generate(GeneratorMode::Range, &bag).unwrap();
        assert_eq!(result.values.len(), 10_000);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("limited to"));
    }

    #[test]
    fn test_lottery_result_carries_bonus() {
        let result = Generator::seeded(3)
            .generate(GeneratorMode::Lottery, &GeneratorParams::default())
            .unwrap();
        assert_eq!(result.values.len(), 5);
        assert_eq!(result.bonus_values.as_ref().map(Vec::len), Some(1));
        assert!(result.formatted.contains(" | bonus: "));
    }

    #[test]
    fn test_ticket_bag_round_trips_through_params() {
        let mut generator = Generator::seeded(5);
        let mut bag = params(r#"{"min": 1, "max": 4, "count": 3}"#);
        let first = generator.generate(GeneratorMode::Ticket, &bag).unwrap();
        let Some(GenerationMeta::Ticket(meta)) = first.meta else {
            panic!("expected ticket meta");
        };
        bag.ticket_remaining = Some(meta.ticket_remaining);

        let second = generator.generate(GeneratorMode::Ticket, &bag).unwrap();
        assert_eq!(second.values.len(), 1);
        assert!(second.has_warnings());
        let mut all: Vec<GeneratedValue> = first.values.into_iter().chain(second.values).collect();
        all.sort_by_key(|v| v.as_i64());
        assert_eq!(all, (1..=4).map(GeneratedValue::Int).collect::<Vec<_>>());
    }

    #[test]
    fn test_advantage_meta_serializes() {
        let result = Generator::seeded(8)
            .generate(GeneratorMode::Dice, &params(r#"{"sides": "20", "advantage": "yes"}"#))
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["meta"]["advantage"]["mode"], "advantage");
        assert_eq!(json["values"][0], json["meta"]["advantage"]["kept"]);
    }

    #[test]
    fn test_entropy_failure_is_fatal() {
        let result = generate_with(&mut FailingSource, GeneratorMode::Uuid, &GeneratorParams::default());
        assert!(matches!(result, Err(GeneratorError::EntropyUnavailable(_))));
    }

    #[test]
    fn test_os_generate() {
        let result = generate(GeneratorMode::Password, &params(r#"{"length": 24}"#)).unwrap();
        assert_eq!(result.values[0].to_string().chars().count(), 24);
    }
}
