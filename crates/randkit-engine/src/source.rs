//! Random byte sources and unbiased draws on top of them.

use crate::error::GeneratorError;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// A source of random bytes with unbiased integer and float draws.
///
/// Implementors only provide [`fill_bytes`](RandomSource::fill_bytes); every
/// other draw is derived from it. A failing source is fatal: the error is
/// returned as-is and never retried.
pub trait RandomSource {
    /// Fill `dest` with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), GeneratorError>;

    /// A uniformly distributed 64-bit word.
    fn next_u64(&mut self) -> Result<u64, GeneratorError> {
        let mut word = [0u8; 8];
        self.fill_bytes(&mut word)?;
        Ok(u64::from_le_bytes(word))
    }

    /// A uniform integer in `0..bound`, without modulo bias.
    ///
    /// Words at or above the largest multiple of `bound` that fits in 64
    /// bits are rejected and redrawn. `bound` of 0 or 1 always yields 0.
    fn uniform_int(&mut self, bound: u64) -> Result<u64, GeneratorError> {
        if bound <= 1 {
            return Ok(0);
        }
        // 2^64 mod bound: the size of the biased tail.
        let tail = (u64::MAX % bound + 1) % bound;
        loop {
            let word = self.next_u64()?;
            if word <= u64::MAX - tail {
                return Ok(word % bound);
            }
        }
    }

    /// A uniform index in `0..bound`.
    fn uniform_index(&mut self, bound: usize) -> Result<usize, GeneratorError> {
        Ok(self.uniform_int(bound as u64)? as usize)
    }

    /// A uniform float in `[0, 1)` with 53 bits of precision.
    fn uniform_float(&mut self) -> Result<f64, GeneratorError> {
        Ok((self.next_u64()? >> 11) as f64 * (1.0 / (1u64 << 53) as f64))
    }

    /// `n` random bytes.
    fn bytes(&mut self, n: usize) -> Result<Vec<u8>, GeneratorError> {
        let mut buf = vec![0u8; n];
        self.fill_bytes(&mut buf)?;
        Ok(buf)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        (**self).fill_bytes(dest)
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

/// The operating system CSPRNG. Use this for anything user-facing.
pub type OsSource = RngSource<OsRng>;

/// Seeded, reproducible generator; not for secrets.
pub type SeededSource = RngSource<StdRng>;

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<OsRng> {
    pub fn os() -> Self {
        Self::new(OsRng)
    }
}

impl RngSource<StdRng> {
    /// Same seed, same stream.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        self.rng
            .try_fill_bytes(dest)
            .map_err(|e| GeneratorError::EntropyUnavailable(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A source whose entropy has run dry.
    pub struct FailingSource;

    impl RandomSource for FailingSource {
        fn fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), GeneratorError> {
            Err(GeneratorError::EntropyUnavailable(
                "getrandom: device not configured".to_string(),
            ))
        }
    }

    /// Replays a fixed list of words, then repeats the last one.
    pub struct ScriptedSource {
        words: Vec<u64>,
        next: usize,
    }

    impl ScriptedSource {
        pub fn new(words: Vec<u64>) -> Self {
            Self { words, next: 0 }
        }

        pub fn consumed(&self) -> usize {
            self.next
        }
    }

    impl RandomSource for ScriptedSource {
        fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), GeneratorError> {
            for chunk in dest.chunks_mut(8) {
                let word = self.words[self.next.min(self.words.len() - 1)];
                self.next += 1;
                chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FailingSource, ScriptedSource};
    use super::*;

    #[test]
    fn test_uniform_int_stays_in_bounds() {
        let mut source = SeededSource::seeded(42);
        for bound in [1u64, 2, 3, 7, 10, 1000, u64::MAX] {
            for _ in 0..200 {
                assert!(source.uniform_int(bound).unwrap() < bound.max(1));
            }
        }
        assert_eq!(source.uniform_int(0).unwrap(), 0);
    }

    #[test]
    fn test_uniform_int_rejects_biased_tail() {
        // bound 3: 2^64 mod 3 == 1, so u64::MAX is the single rejected word.
        let mut source = ScriptedSource::new(vec![u64::MAX, 5]);
        assert_eq!(source.uniform_int(3).unwrap(), 5 % 3);
        assert_eq!(source.consumed(), 2);
    }

    #[test]
    fn test_power_of_two_bound_never_rejects() {
        let mut source = ScriptedSource::new(vec![u64::MAX]);
        assert_eq!(source.uniform_int(8).unwrap(), 7);
        assert_eq!(source.consumed(), 1);
    }

    #[test]
    fn test_uniform_float_range() {
        let mut source = ScriptedSource::new(vec![u64::MAX]);
        let f = source.uniform_float().unwrap();
        assert!((0.0..1.0).contains(&f));

        let mut source = ScriptedSource::new(vec![0]);
        assert_eq!(source.uniform_float().unwrap(), 0.0);
    }

    #[test]
    fn test_seeded_sources_are_reproducible() {
        let mut a = SeededSource::seeded(7);
        let mut b = SeededSource::seeded(7);
        assert_eq!(a.bytes(32).unwrap(), b.bytes(32).unwrap());
    }

    #[test]
    fn test_os_source_produces_bytes() {
        let mut source = OsSource::os();
        let first = source.bytes(32).unwrap();
        let second = source.bytes(32).unwrap();
        assert_eq!(first.len(), 32);
        assert_ne!(first, second);
    }

    #[test]
    fn test_failure_propagates() {
        let mut source = FailingSource;
        assert!(matches!(
            source.uniform_int(10),
            Err(GeneratorError::EntropyUnavailable(_))
        ));
        assert!(source.bytes(4).is_err());
    }
}
