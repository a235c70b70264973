//! PermutationChecker: audits a wiring against the internal method.
//!
//! Works on any sequence, whether produced by
//! [`WiringGenerator`](super::WiringGenerator) or copied from a historical
//! wiring table.

use std::fmt;

use crate::error::SigabaError;

/// How often each difference value is used by a wiring, plus a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationChecker {
    diff_used: Vec<usize>,
    permutation_ok: bool,
    score: usize,
}

impl PermutationChecker {
    /// Audits a sequence of zero-based symbols.
    ///
    /// # Parameters
    /// - `values`: The wiring, `values[i]` being the output for input `i`.
    ///
    /// # Returns
    /// The difference usage table, whether `values` is a permutation, and
    /// the discrepancy score against the ideal usage (0 is ideal).
    ///
    /// # Errors
    /// Returns [`SigabaError::SymbolOutOfRange`] if a value is not below
    /// `values.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigaba::PermutationChecker;
    ///
    /// let report = PermutationChecker::check(&[0, 2, 4, 1, 3]).unwrap();
    /// assert!(report.permutation_ok());
    /// assert_eq!(report.score(), 0);
    /// ```
    pub fn check(values: &[usize]) -> Result<Self, SigabaError> {
        let n = values.len();
        let mut used = vec![false; n];
        let mut diff_used = vec![0usize; n];
        let mut permutation_ok = true;

        for (i, &v) in values.iter().enumerate() {
            if v >= n {
                return Err(SigabaError::SymbolOutOfRange {
                    value: v,
                    position: i,
                    size: n,
                });
            }
            if used[v] {
                permutation_ok = false;
            } else {
                used[v] = true;
            }
            diff_used[(v + n - i) % n] += 1;
        }

        // usage[k] = number of difference values used exactly k times
        let mut usage = vec![0usize; n + 1];
        for &count in diff_used.iter() {
            usage[count] += 1;
        }
        let score = usage
            .iter()
            .zip(ideal_usage(n).iter())
            .map(|(&a, &b)| a.abs_diff(b))
            .sum();

        Ok(PermutationChecker {
            diff_used,
            permutation_ok,
            score,
        })
    }

    /// Audits a wiring written as characters counted from `base`, e.g. a
    /// letter string with base `'A'` or a digit string with base `'0'`.
    ///
    /// # Errors
    /// Returns [`SigabaError::SymbolOutOfRange`] for characters below
    /// `base` or beyond the wiring length.
    pub fn check_symbols(symbols: &str, base: char) -> Result<Self, SigabaError> {
        let n = symbols.chars().count();
        let mut values = Vec::with_capacity(n);
        for (i, c) in symbols.chars().enumerate() {
            let offset = (c as u32).checked_sub(base as u32).ok_or_else(|| {
                SigabaError::SymbolOutOfRange {
                    value: c as usize,
                    position: i,
                    size: n,
                }
            })?;
            values.push(offset as usize);
        }
        Self::check(&values)
    }

    /// Times each difference value `0..N` occurs.
    pub fn diff_used(&self) -> &[usize] {
        &self.diff_used
    }

    /// `false` if any output symbol repeats.
    pub fn permutation_ok(&self) -> bool {
        self.permutation_ok
    }

    /// Sum of absolute deviations from the ideal difference usage.
    pub fn score(&self) -> usize {
        self.score
    }

    /// `true` for a permutation with a perfect difference distribution.
    pub fn is_ideal(&self) -> bool {
        self.permutation_ok && self.score == 0
    }
}

/// Ideal histogram of difference usage for size `n`.
///
/// Index `k` holds how many difference values should be used exactly `k`
/// times: all `n` once for odd `n`; for even `n` one unused, `n - 2` once
/// and one twice.
pub(crate) fn ideal_usage(n: usize) -> Vec<usize> {
    let mut ideal = vec![0usize; n + 1];
    if n == 0 {
        return ideal;
    }
    if n % 2 == 0 {
        ideal[0] = 1;
        ideal[1] = n - 2;
        ideal[2] = 1;
    } else {
        ideal[1] = n;
    }
    ideal
}

impl fmt::Display for PermutationChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (diff, &times) in self.diff_used.iter().enumerate() {
            if times != 1 {
                writeln!(f, "diff {} used {} times.", diff, times)?;
            }
        }
        write!(
            f,
            "permutation is {}, discrepancy: {}",
            if self.permutation_ok { "OK" } else { "Bad" },
            self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiring::{BIG_ROTOR_WIRINGS, INDEX_ROTOR_WIRINGS};

    #[test]
    fn test_index_catalog_follows_internal_method() {
        for wiring in INDEX_ROTOR_WIRINGS.iter() {
            let report = PermutationChecker::check(wiring).unwrap();
            assert!(report.is_ideal(), "{:?}: {}", wiring, report);
        }
    }

    #[test]
    fn test_big_catalog_is_not_internal_method() {
        let report = PermutationChecker::check(&BIG_ROTOR_WIRINGS[0]).unwrap();
        assert!(report.permutation_ok());
        assert_eq!(report.score(), 34);
    }

    #[test]
    fn test_identity_scores() {
        // even: diff 0 used ten times
        let report = PermutationChecker::check(&(0..10).collect::<Vec<_>>()).unwrap();
        assert!(report.permutation_ok());
        assert_eq!(report.diff_used()[0], 10);
        assert_eq!(report.score(), 18);

        let report = PermutationChecker::check(&(0..7).collect::<Vec<_>>()).unwrap();
        assert_eq!(report.score(), 14);
    }

    #[test]
    fn test_repeated_symbol() {
        let report = PermutationChecker::check(&[0, 0, 1]).unwrap();
        assert!(!report.permutation_ok());
        assert!(!report.is_ideal());
        assert_eq!(report.score(), 4);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            PermutationChecker::check(&[0, 3, 1]),
            Err(SigabaError::SymbolOutOfRange {
                value: 3,
                position: 1,
                size: 3
            })
        );
    }

    #[test]
    fn test_check_symbols() {
        let report = PermutationChecker::check_symbols("7591482630", '0').unwrap();
        assert!(report.is_ideal());
        let report =
            PermutationChecker::check_symbols("YCHLQSUGBDIXNZKERPVJTAWFOM", 'A').unwrap();
        assert_eq!(report.score(), 34);
        assert!(PermutationChecker::check_symbols("AB!", 'A').is_err());
    }

    #[test]
    fn test_small_sizes() {
        assert!(PermutationChecker::check(&[]).unwrap().is_ideal());
        assert!(PermutationChecker::check(&[0]).unwrap().is_ideal());
        assert!(PermutationChecker::check(&[1, 0]).unwrap().is_ideal());
    }

    #[test]
    fn test_display() {
        let report = PermutationChecker::check(&[0, 2, 4, 1, 3]).unwrap();
        assert_eq!(report.to_string(), "permutation is OK, discrepancy: 0");

        let report = PermutationChecker::check(&[0, 1, 2]).unwrap();
        let shown = report.to_string();
        assert!(shown.contains("diff 0 used 3 times."));
        assert!(shown.ends_with("permutation is OK, discrepancy: 6"));

        let report = PermutationChecker::check(&[0, 0, 1]).unwrap();
        assert_eq!(
            report.to_string(),
            "diff 1 used 0 times.\ndiff 2 used 2 times.\npermutation is Bad, discrepancy: 4"
        );
    }
}
