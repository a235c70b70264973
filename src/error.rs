//! Error types for the SIGABA library.

use thiserror::Error;

use crate::bank::BankKind;

/// Errors produced by the SIGABA library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigabaError {
    /// A rotor order string is not exactly 10 characters long.
    #[error("{bank} order must be of length 10, got {len}")]
    OrderLength { bank: BankKind, len: usize },

    /// A rotor number in an order string is outside the bank's catalog.
    #[error("{bank} rotors must be numbers >= 0 and < {limit}, got '{found}'")]
    RotorNumber {
        bank: BankKind,
        limit: usize,
        found: char,
    },

    /// A rotor orientation letter is neither `N` nor `R`.
    #[error("{bank} orientations must be N or R, got '{found}'")]
    Orientation { bank: BankKind, found: char },

    /// A big rotor appears more than once across the cipher and control banks.
    #[error("big rotor {rotor} can only be used once")]
    DuplicateBigRotor { rotor: usize },

    /// An index rotor appears more than once in the index bank.
    #[error("index rotor {rotor} can only be used once")]
    DuplicateIndexRotor { rotor: usize },

    /// A position string is not exactly 5 characters long.
    #[error("{bank} position must be 5 characters, got {len}")]
    PositionLength { bank: BankKind, len: usize },

    /// A position character is outside the bank's alphabet.
    #[error("{bank} position must be >= {first} and <= {last}, got '{found}'")]
    PositionChar {
        bank: BankKind,
        found: char,
        first: char,
        last: char,
    },

    /// The machine type name is not one of the known variants.
    #[error("invalid machine type: {0} (expected CSP889, CSP2900 or CSPNONE)")]
    UnknownMachine(String),

    /// A wiring was requested for an alphabet of size zero.
    #[error("rotor size must be at least 1")]
    EmptyWiring,

    /// A supplied rotor wiring is not a permutation of `0..N`.
    #[error("rotor wiring is not a permutation: symbol {symbol} appears more than once")]
    NotAPermutation { symbol: usize },

    /// The backtracking wiring search ran out of candidates.
    #[error(
        "wiring search for size {size} exhausted after {iterations} iterations (deepest level {depth})"
    )]
    SearchExhausted {
        size: usize,
        depth: usize,
        iterations: usize,
    },

    /// A checked sequence contains a symbol outside `0..size`.
    #[error("symbol {value} at position {position} is outside 0..{size}")]
    SymbolOutOfRange {
        value: usize,
        position: usize,
        size: usize,
    },

    /// The random source failed to deliver entropy.
    #[error("random source failed: {0}")]
    RandomSource(String),

    /// A settings document could not be parsed.
    #[error("invalid settings: {0}")]
    Settings(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_length() {
        let err = SigabaError::OrderLength {
            bank: BankKind::Cipher,
            len: 8,
        };
        assert_eq!(format!("{}", err), "cipher order must be of length 10, got 8");
    }

    #[test]
    fn test_display_position_char() {
        let err = SigabaError::PositionChar {
            bank: BankKind::Index,
            found: 'x',
            first: '0',
            last: '9',
        };
        assert_eq!(
            format!("{}", err),
            "index position must be >= 0 and <= 9, got 'x'"
        );
    }

    #[test]
    fn test_display_search_exhausted() {
        let err = SigabaError::SearchExhausted {
            size: 4,
            depth: 2,
            iterations: 17,
        };
        assert_eq!(
            format!("{}", err),
            "wiring search for size 4 exhausted after 17 iterations (deepest level 2)"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(SigabaError::EmptyWiring, SigabaError::EmptyWiring);
        assert_ne!(
            SigabaError::DuplicateBigRotor { rotor: 1 },
            SigabaError::DuplicateIndexRotor { rotor: 1 }
        );
    }

    #[test]
    fn test_error_clone() {
        let err = SigabaError::RandomSource("drained".to_string());
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
