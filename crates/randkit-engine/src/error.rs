//! Error type for generation.

/// Error type for generator operations.
///
/// Infeasible requests never produce an error; they degrade and report
/// warnings on the result. The only failure is losing the random source.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The secure random byte source failed
    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),
}
