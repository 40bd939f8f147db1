//! Core types for the randkit generation engine.
//!
//! This crate provides the data model shared by the engine and its callers:
//!
//! - [`GeneratorMode`] - Which kind of value a request asks for
//! - [`GeneratorParams`] - Tolerant superset parameter bag accepted at the boundary
//! - [`ModeParams`] - Typed, normalized parameters for exactly one mode
//! - [`GeneratedValue`] - A single generated value (integer, float or text)
//! - [`GenerationResult`] - Values plus formatted output, warnings and per-mode meta
//!
//! # Architecture
//!
//! ```text
//! randkit-core (this crate)
//!    │
//!    ├─── randkit-engine   (samplers + generate(), depends on randkit-core)
//!    │
//!    └─── randkit          (CLI front end, config file, output rendering)
//! ```
//!
//! # Example
//!
//! ```rust
//! use randkit_core::{GeneratorMode, GeneratorParams, ModeParams};
//!
//! let params = GeneratorParams::from_json(r#"{"min": "1", "max": 6, "count": 3, "color": "ignored"}"#).unwrap();
//! let projected = params.project(GeneratorMode::Range);
//!
//! match projected.params {
//!     ModeParams::Range(range) => assert_eq!(range.count, 3),
//!     other => panic!("unexpected projection: {other:?}"),
//! }
//! ```

pub mod mode;
pub mod modes;
pub mod params;
pub mod values;

// Re-exports for convenience
pub use mode::GeneratorMode;
pub use modes::{
    limits, BytesParams, ByteEncoding, CoinParams, ColorParams, DiceParams, ListParams,
    LotteryParams, ModeParams, PasswordParams, PinParams, PoolRange, Projected, RangeParams,
    ShuffleParams, SortOrder, TicketParams, TicketSource, UuidParams,
};
pub use params::{GeneratorParams, ParamsError, PoolSpec};
pub use values::{
    AdvantageMeta, CoinMeta, DiceMeta, GeneratedValue, GenerationMeta, GenerationResult,
    LabelCount, ListMeta, LotteryMeta, PoolMeta, PrimitiveMeta, RangeMeta, RollMode, SecretMeta,
    ShuffleMeta, Streak, Strength, TicketMeta,
};
