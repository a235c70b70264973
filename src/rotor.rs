//! Rotor: keyed substitution wheel with a rotational offset.
//!
//! A rotor permutes an alphabet of `N` symbols. The same type backs the
//! 26-letter cipher and control rotors and the 10-digit index rotors.

use std::fmt;

use crate::error::SigabaError;
use crate::wiring::{BIG_ROTOR_WIRINGS, INDEX_ROTOR_WIRINGS};

/// A 26-symbol rotor used in the cipher and control banks.
pub type BigRotor = Rotor<26>;

/// A 10-symbol rotor used in the index bank.
pub type IndexRotor = Rotor<10>;

/// Keyed substitution wheel over `N` symbols.
///
/// `left` is the wiring read from the entry side and `right` is its
/// inverse. A reversed rotor is inserted into the bank upside down, which
/// swaps the roles of the two tables and the sign of rotation.
///
/// All symbol arguments must be in `0..N`; this is a caller precondition
/// and is only checked in debug builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor<const N: usize> {
    left: [usize; N],
    right: [usize; N],
    pos: usize,
    reversed: bool,
    wiring_num: Option<usize>,
}

impl<const N: usize> Rotor<N> {
    /// Creates a rotor from an explicit wiring.
    ///
    /// # Parameters
    /// - `wiring`: Permutation of `0..N` mapping input symbol to output symbol.
    /// - `reversed`: Whether the rotor is inserted reversed.
    ///
    /// # Errors
    /// Returns [`SigabaError::NotAPermutation`] if a symbol repeats, or
    /// [`SigabaError::SymbolOutOfRange`] if a symbol is `>= N`.
    pub fn with_wiring(wiring: [usize; N], reversed: bool) -> Result<Self, SigabaError> {
        let mut right = [usize::MAX; N];
        for (i, &s) in wiring.iter().enumerate() {
            if s >= N {
                return Err(SigabaError::SymbolOutOfRange {
                    value: s,
                    position: i,
                    size: N,
                });
            }
            if right[s] != usize::MAX {
                return Err(SigabaError::NotAPermutation { symbol: s });
            }
            right[s] = i;
        }
        Ok(Rotor {
            left: wiring,
            right,
            pos: 0,
            reversed,
            wiring_num: None,
        })
    }

    /// Encrypts one symbol (entry side to exit side).
    pub fn encrypt(&self, symbol: usize) -> usize {
        debug_assert!(symbol < N);
        let p = self.pos;
        if self.reversed {
            (p + N - self.right[(p + N - symbol) % N]) % N
        } else {
            (self.left[(symbol + p) % N] + N - p) % N
        }
    }

    /// Decrypts one symbol; the inverse of [`encrypt`](Self::encrypt).
    pub fn decrypt(&self, symbol: usize) -> usize {
        debug_assert!(symbol < N);
        let p = self.pos;
        if self.reversed {
            (p + N - self.left[(p + N - symbol) % N]) % N
        } else {
            (self.right[(symbol + p) % N] + N - p) % N
        }
    }

    /// Rotates the rotor by `steps` clicks (negative for the other way).
    ///
    /// Reversed rotors advance their position, normal rotors retreat it.
    pub fn rotate(&mut self, steps: i32) {
        let n = N as i64;
        let delta = if self.reversed {
            steps as i64
        } else {
            -(steps as i64)
        };
        self.pos = (self.pos as i64 + delta).rem_euclid(n) as usize;
    }

    /// Returns the current position in `0..N`.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Sets the position, reduced into `0..N`.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos % N;
    }

    /// Returns `true` if the rotor is inserted reversed.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Returns the catalog number this rotor was taken from, if any.
    pub fn wiring_num(&self) -> Option<usize> {
        self.wiring_num
    }
}

impl BigRotor {
    /// Takes big rotor `num` from the catalog.
    pub(crate) fn from_catalog(num: usize, reversed: bool) -> Self {
        Self::catalog_rotor(BIG_ROTOR_WIRINGS[num], num, reversed)
    }
}

impl IndexRotor {
    /// Takes index rotor `num` from the catalog.
    pub(crate) fn from_catalog(num: usize, reversed: bool) -> Self {
        Self::catalog_rotor(INDEX_ROTOR_WIRINGS[num], num, reversed)
    }
}

impl<const N: usize> Rotor<N> {
    fn catalog_rotor(wiring: [usize; N], num: usize, reversed: bool) -> Self {
        let mut right = [0usize; N];
        for (i, &s) in wiring.iter().enumerate() {
            right[s] = i;
        }
        Rotor {
            left: wiring,
            right,
            pos: 0,
            reversed,
            wiring_num: Some(num),
        }
    }
}

impl<const N: usize> fmt::Display for Rotor<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orientation = if self.reversed { 'R' } else { 'N' };
        match self.wiring_num {
            Some(num) => write!(f, "{}{}", num, orientation),
            None => write!(f, "?{}", orientation),
        }
    }
}
