//! WiringGenerator: randomized backtracking search for internal-method
//! rotor wirings.
//!
//! Depth `j` picks `chosen[j]`, the difference used at position `j`. The
//! candidate set for depth `j + 1` excludes differences already used (one
//! reuse is allowed at the last depth of an even-sized rotor) and any
//! candidate that would land on the same output symbol as an earlier
//! position. Each depth keeps its untried candidates so backtracking never
//! repeats a choice.

use std::fmt;

use rand::TryRngCore;
use tracing::{debug, warn};

use super::checker::PermutationChecker;
use super::random::uniform_below;
use crate::error::SigabaError;

/// Builds random rotor wirings of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiringGenerator {
    size: usize,
}

/// A completed search: the difference sequence, the wiring it defines and
/// how many picks the search took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedWiring {
    diff: Vec<usize>,
    perm: Vec<usize>,
    iterations: usize,
}

impl WiringGenerator {
    /// Creates a generator for wirings of `size` symbols.
    ///
    /// # Errors
    /// Returns [`SigabaError::EmptyWiring`] if `size` is 0.
    pub fn new(size: usize) -> Result<Self, SigabaError> {
        if size == 0 {
            return Err(SigabaError::EmptyWiring);
        }
        Ok(WiringGenerator { size })
    }

    /// Number of symbols in generated wirings.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs the search with randomness drawn from `rng`.
    ///
    /// # Parameters
    /// - `rng`: Any fallible or infallible random source.
    ///
    /// # Returns
    /// A wiring whose difference distribution is ideal for its size.
    ///
    /// # Errors
    /// - [`SigabaError::RandomSource`] if `rng` fails. The search is
    ///   abandoned and nothing is retried.
    /// - [`SigabaError::SearchExhausted`] if every branch was tried without
    ///   reaching full depth.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use sigaba::{PermutationChecker, WiringGenerator};
    ///
    /// let mut rng = StdRng::seed_from_u64(1942);
    /// let wiring = WiringGenerator::new(26).unwrap().generate(&mut rng).unwrap();
    /// let report = PermutationChecker::check(wiring.perm()).unwrap();
    /// assert!(report.is_ideal());
    /// ```
    pub fn generate<R>(&self, rng: &mut R) -> Result<GeneratedWiring, SigabaError>
    where
        R: TryRngCore + ?Sized,
    {
        let n = self.size;
        let all: Vec<usize> = (0..n).collect();
        let mut chosen = vec![0usize; n];
        let mut available: Vec<Vec<usize>> = vec![Vec::new(); n];
        available[0] = all.clone();

        let mut j: usize = 0;
        let mut deepest = 0;
        let mut iterations = 0;

        loop {
            if available[j].is_empty() {
                if j == 0 {
                    warn!(size = n, depth = deepest, iterations, "wiring search exhausted");
                    return Err(SigabaError::SearchExhausted {
                        size: n,
                        depth: deepest,
                        iterations,
                    });
                }
                j -= 1;
                continue;
            }

            iterations += 1;
            let pick = uniform_below(rng, available[j].len())?;
            chosen[j] = available[j].swap_remove(pick);

            if j == n - 1 {
                break;
            }

            let allow_reuse = n % 2 == 0 && j == n - 2;
            let next: Vec<usize> = all
                .iter()
                .copied()
                .filter(|k| allow_reuse || !chosen[..=j].contains(k))
                .filter(|&k| {
                    // same output symbol as an earlier position
                    (0..=j).all(|l| (chosen[l] + l) % n != (k + j + 1) % n)
                })
                .collect();

            if !next.is_empty() {
                available[j + 1] = next;
                j += 1;
                deepest = deepest.max(j);
            }
        }

        let diff: Vec<usize> = if n % 2 == 0 {
            // move the duplicated difference away from the last slot
            let k = uniform_below(rng, n)?;
            (0..n).map(|l| chosen[(k + l) % n]).collect()
        } else {
            chosen
        };
        let perm: Vec<usize> = diff.iter().enumerate().map(|(l, &d)| (d + l) % n).collect();

        debug!(size = n, iterations, "wiring search complete");
        Ok(GeneratedWiring {
            diff,
            perm,
            iterations,
        })
    }
}

impl GeneratedWiring {
    /// The wiring: `perm()[i]` is the output symbol for input `i`.
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// Difference `(perm[i] - i) mod N` at every position.
    pub fn diff(&self) -> &[usize] {
        &self.diff
    }

    /// Random picks made before the search completed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Consumes the result, keeping only the wiring.
    pub fn into_perm(self) -> Vec<usize> {
        self.perm
    }

    /// Renders the wiring as letters (`A` = 0), for sizes up to 26.
    pub fn to_letters(&self) -> Option<String> {
        if self.perm.len() > 26 {
            return None;
        }
        Some(self.perm.iter().map(|&s| (b'A' + s as u8) as char).collect())
    }
}

impl fmt::Display for GeneratedWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} iterations.", self.iterations)?;
        writeln!(f, "{:>10}{:>10}{:>10}", "", "perm", "diff")?;
        for (k, (p, d)) in self.perm.iter().zip(self.diff.iter()).enumerate() {
            writeln!(f, "{:>10}{:>10}{:>10}", k, p, d)?;
        }
        match PermutationChecker::check(&self.perm) {
            Ok(report) => write!(f, "{}", report),
            Err(e) => write!(f, "{}", e),
        }
    }
}
