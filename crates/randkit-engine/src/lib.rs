//! Secure random generation engine.
//!
//! A single entry point, [`generate`], takes a [`GeneratorMode`] and the
//! tolerant [`GeneratorParams`] bag, and returns a [`GenerationResult`]:
//! values, a display rendering, warnings and per-mode meta.
//!
//! # Architecture
//!
//! ```text
//! GeneratorParams ──project──▶ ModeParams
//!                                  │
//!                                  ▼
//!                      ┌───────────────────────┐
//!                      │  generators::*        │
//!                      │   range  list  dice   │──▶ Draw ──render──▶ GenerationResult
//!                      │   password  lottery   │
//!                      │   ticket  primitive   │
//!                      └──────────┬────────────┘
//!                                 │
//!                     sample / shuffle / weighted
//!                                 │
//!                                 ▼
//!                      RandomSource (OsRng | StdRng)
//! ```
//!
//! Every draw goes through [`RandomSource`], which maps raw bytes onto
//! integer ranges by rejection sampling. Requests that cannot be met exactly
//! degrade and report a warning; the only error is a failing byte source.
//!
//! # Example
//!
//! ```rust
//! use randkit_core::{GeneratorMode, GeneratorParams};
//!
//! let params = GeneratorParams::from_json(r#"{"min": 1, "max": 6, "count": 3}"#).unwrap();
//! let result = randkit_engine::generate(GeneratorMode::Range, &params).unwrap();
//!
//! assert_eq!(result.values.len(), 3);
//! println!("{}", result.formatted);
//! ```

pub mod error;
pub mod format;
pub mod generator;
pub mod generators;
pub mod sample;
pub mod shuffle;
pub mod source;

// Re-exports for convenience
pub use error::GeneratorError;
pub use generator::{generate, generate_with, Generator};
pub use randkit_core::{GenerationResult, GeneratorMode, GeneratorParams};
pub use source::{OsSource, RandomSource, RngSource, SeededSource};
