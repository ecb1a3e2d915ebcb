//! Window sampling
//!
//! Selects a random contiguous window from a parsed file so statistics
//! are computed over a bounded sample rather than the full series.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ScanError;
use crate::models::Observation;

/// Source of uniform random offsets
///
/// Injectable so sampling is deterministic in tests and reproducible
/// through the CLI seed flag.
pub trait RandomSource {
    /// Return a value uniformly distributed in `[0, bound)`
    fn next_in(&mut self, bound: u64) -> u64;
}

/// Clock-derived random source used outside of tests
#[derive(Debug, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn next_in(&mut self, bound: u64) -> u64 {
        if bound <= 1 {
            return 0;
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        now % bound
    }
}

/// Deterministic xorshift random source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    /// Create a seeded source
    ///
    /// A zero seed is remapped to a fixed non-zero state, since
    /// xorshift never leaves zero.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in(&mut self, bound: u64) -> u64 {
        if bound <= 1 {
            return 0;
        }

        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state % bound
    }
}

/// Select a random contiguous window of `window_size` observations
///
/// The start offset is drawn uniformly from `[0, data.len() - window_size]`
/// inclusive, so the window always fits within the source bounds. Returns
/// a borrowed view; the input is not copied.
///
/// # Errors
/// `ScanError::InsufficientData` when the source holds fewer rows than
/// the window size.
pub fn sample<'a>(
    data: &'a [Observation],
    window_size: usize,
    rng: &mut dyn RandomSource,
) -> Result<&'a [Observation], ScanError> {
    if data.len() < window_size {
        return Err(ScanError::InsufficientData {
            rows: data.len(),
            required: window_size,
        });
    }

    let max_start = data.len() - window_size;
    let start = rng.next_in(max_start as u64 + 1) as usize;

    Ok(&data[start..start + window_size])
}
