//! Uniform draws from a fallible random source.

use rand::TryRngCore;

use crate::error::SigabaError;

/// Draws a uniform index in `0..bound`.
///
/// Uses widening multiplication with rejection of the biased low zone, so
/// every index is equally likely. Failures of the source are returned, not
/// retried.
///
/// # Parameters
/// - `rng`: The random source.
/// - `bound`: Exclusive upper bound, `1..=u32::MAX`.
///
/// # Errors
/// Returns [`SigabaError::RandomSource`] if the source fails.
pub(crate) fn uniform_below<R>(rng: &mut R, bound: usize) -> Result<usize, SigabaError>
where
    R: TryRngCore + ?Sized,
{
    debug_assert!(bound > 0 && bound <= u32::MAX as usize);
    let bound = bound as u32;
    // (2^32 - bound) mod bound: draws whose low half falls below this are biased
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let x = rng
            .try_next_u32()
            .map_err(|e| SigabaError::RandomSource(e.to_string()))?;
        let wide = u64::from(x) * u64::from(bound);
        if (wide as u32) >= threshold {
            return Ok((wide >> 32) as usize);
        }
    }
}
