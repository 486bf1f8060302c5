//! Simulated "typing" pause before a bot reply is shown.
//!
//! Purely presentational: the reply has already arrived when the pause
//! starts. Callers supply the random sample so this stays deterministic and
//! usable from wasm, where the browser owns the RNG.

use std::time::Duration;

/// Shortest pause.
pub const MIN_TYPING_DELAY_MS: u64 = 1000;
/// Upper bound of the pause (exclusive).
pub const MAX_TYPING_DELAY_MS: u64 = 2500;

/// Map a uniform sample in `[0, 1)` onto `[1000, 2500)` ms.
///
/// Out-of-range samples are clamped.
pub fn typing_delay(sample: f64) -> Duration {
    let span = (MAX_TYPING_DELAY_MS - MIN_TYPING_DELAY_MS) as f64;
    let sample = if sample.is_nan() { 0.0 } else { sample.clamp(0.0, 1.0) };
    let offset = ((sample * span) as u64).min(MAX_TYPING_DELAY_MS - MIN_TYPING_DELAY_MS - 1);
    Duration::from_millis(MIN_TYPING_DELAY_MS + offset)
}
