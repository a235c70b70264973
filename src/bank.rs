//! RotorBank: an ordered group of five rotors acting as one stage.
//!
//! The machine has three banks. Cipher and control banks hold big rotors,
//! the index bank holds index rotors. Order strings select rotors from the
//! catalogs as five `(digit, orientation)` pairs, e.g. `"0N1R2N3R4N"`.

use std::fmt;

use crate::error::SigabaError;
use crate::rotor::{BigRotor, IndexRotor, Rotor};
use crate::wiring::{BANK_SIZE, BIG_ROTOR_WIRINGS, INDEX_ROTOR_WIRINGS};

/// Length of a rotor order string.
const ORDER_LEN: usize = 2 * BANK_SIZE;

/// Identifies one of the three rotor banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankKind {
    Cipher,
    Control,
    Index,
}

impl BankKind {
    /// Number of catalog rotors this bank can draw from.
    pub fn catalog_len(self) -> usize {
        match self {
            BankKind::Cipher | BankKind::Control => BIG_ROTOR_WIRINGS.len(),
            BankKind::Index => INDEX_ROTOR_WIRINGS.len(),
        }
    }

    /// First and last characters of this bank's position alphabet.
    pub fn position_range(self) -> (char, char) {
        match self {
            BankKind::Cipher | BankKind::Control => ('A', 'Z'),
            BankKind::Index => ('0', '9'),
        }
    }
}

impl fmt::Display for BankKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BankKind::Cipher => "cipher",
            BankKind::Control => "control",
            BankKind::Index => "index",
        };
        f.write_str(name)
    }
}

/// One slot of an order string: which catalog rotor, and which way up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorSpec {
    pub wiring: usize,
    pub reversed: bool,
}

/// Parses a 10-character order string for `bank`.
///
/// Only the format is checked here; rotor reuse across banks is a
/// settings-level concern (see [`MachineSettings::validate`](crate::MachineSettings::validate)).
///
/// # Errors
/// Returns [`SigabaError::OrderLength`], [`SigabaError::RotorNumber`] or
/// [`SigabaError::Orientation`] for malformed strings.
pub fn parse_order(bank: BankKind, order: &str) -> Result<[RotorSpec; BANK_SIZE], SigabaError> {
    let chars: Vec<char> = order.chars().collect();
    if chars.len() != ORDER_LEN {
        return Err(SigabaError::OrderLength {
            bank,
            len: chars.len(),
        });
    }
    let limit = bank.catalog_len();
    let mut specs = [RotorSpec {
        wiring: 0,
        reversed: false,
    }; BANK_SIZE];
    for (spec, pair) in specs.iter_mut().zip(chars.chunks(2)) {
        let wiring = match pair[0].to_digit(10) {
            Some(d) if (d as usize) < limit => d as usize,
            _ => {
                return Err(SigabaError::RotorNumber {
                    bank,
                    limit,
                    found: pair[0],
                })
            }
        };
        let reversed = match pair[1] {
            'R' => true,
            'N' => false,
            other => return Err(SigabaError::Orientation { bank, found: other }),
        };
        *spec = RotorSpec { wiring, reversed };
    }
    Ok(specs)
}

/// Parses a 5-character position string for `bank` into rotor offsets.
///
/// # Errors
/// Returns [`SigabaError::PositionLength`] or [`SigabaError::PositionChar`].
pub fn parse_positions(bank: BankKind, pos: &str) -> Result<[usize; BANK_SIZE], SigabaError> {
    let chars: Vec<char> = pos.chars().collect();
    if chars.len() != BANK_SIZE {
        return Err(SigabaError::PositionLength {
            bank,
            len: chars.len(),
        });
    }
    let (first, last) = bank.position_range();
    let mut out = [0usize; BANK_SIZE];
    for (slot, &c) in out.iter_mut().zip(chars.iter()) {
        if c < first || c > last {
            return Err(SigabaError::PositionChar {
                bank,
                found: c,
                first,
                last,
            });
        }
        *slot = c as usize - first as usize;
    }
    Ok(out)
}

/// Five rotors in bank order `0..5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorBank<const N: usize> {
    kind: BankKind,
    rotors: [Rotor<N>; BANK_SIZE],
}

impl RotorBank<26> {
    /// Builds a cipher or control bank from parsed order slots.
    pub(crate) fn big(kind: BankKind, specs: &[RotorSpec; BANK_SIZE]) -> Self {
        RotorBank {
            kind,
            rotors: (*specs).map(|s| BigRotor::from_catalog(s.wiring, s.reversed)),
        }
    }
}

impl RotorBank<10> {
    /// Builds the index bank from parsed order slots.
    pub(crate) fn index(specs: &[RotorSpec; BANK_SIZE]) -> Self {
        RotorBank {
            kind: BankKind::Index,
            rotors: (*specs).map(|s| IndexRotor::from_catalog(s.wiring, s.reversed)),
        }
    }
}

impl<const N: usize> RotorBank<N> {
    /// Which bank this is.
    pub fn kind(&self) -> BankKind {
        self.kind
    }

    /// Passes a symbol through every rotor's `encrypt`, rotor 0 first.
    pub fn encrypt_path(&self, symbol: usize) -> usize {
        self.rotors.iter().fold(symbol, |s, r| r.encrypt(s))
    }

    /// Passes a symbol through every rotor's `decrypt`, rotor 4 first.
    pub fn decrypt_path(&self, symbol: usize) -> usize {
        self.rotors.iter().rev().fold(symbol, |s, r| r.decrypt(s))
    }

    /// Returns the rotor in `slot`.
    pub fn rotor(&self, slot: usize) -> &Rotor<N> {
        &self.rotors[slot]
    }

    pub(crate) fn rotor_mut(&mut self, slot: usize) -> &mut Rotor<N> {
        &mut self.rotors[slot]
    }

    /// Returns the five rotor positions.
    pub fn positions(&self) -> [usize; BANK_SIZE] {
        let mut out = [0usize; BANK_SIZE];
        for (p, r) in out.iter_mut().zip(self.rotors.iter()) {
            *p = r.position();
        }
        out
    }

    /// Sets all five rotor positions.
    pub(crate) fn set_positions(&mut self, positions: &[usize; BANK_SIZE]) {
        for (r, &p) in self.rotors.iter_mut().zip(positions.iter()) {
            r.set_position(p);
        }
    }

    /// Renders the positions in the bank's alphabet (`A..Z` or `0..9`).
    pub fn position_string(&self) -> String {
        let (first, _) = self.kind.position_range();
        self.rotors
            .iter()
            .map(|r| (first as u8 + r.position() as u8) as char)
            .collect()
    }
}

impl<const N: usize> fmt::Display for RotorBank<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in self.rotors.iter() {
            write!(f, "{}", r)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_ok() {
        let specs = parse_order(BankKind::Cipher, "0N1R2N3R4N").unwrap();
        assert_eq!(specs[1], RotorSpec { wiring: 1, reversed: true });
        assert_eq!(specs[4], RotorSpec { wiring: 4, reversed: false });
    }

    #[test]
    fn test_parse_order_errors() {
        assert_eq!(
            parse_order(BankKind::Control, "5N6N7N8N9"),
            Err(SigabaError::OrderLength {
                bank: BankKind::Control,
                len: 9
            })
        );
        assert_eq!(
            parse_order(BankKind::Index, "0N1N2N3N5N"),
            Err(SigabaError::RotorNumber {
                bank: BankKind::Index,
                limit: 5,
                found: '5'
            })
        );
        assert_eq!(
            parse_order(BankKind::Cipher, "0N1X2N3N4N"),
            Err(SigabaError::Orientation {
                bank: BankKind::Cipher,
                found: 'X'
            })
        );
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!(
            parse_positions(BankKind::Cipher, "AOZBC").unwrap(),
            [0, 14, 25, 1, 2]
        );
        assert_eq!(
            parse_positions(BankKind::Index, "09123").unwrap(),
            [0, 9, 1, 2, 3]
        );
        assert!(matches!(
            parse_positions(BankKind::Control, "aaaaa"),
            Err(SigabaError::PositionChar { found: 'a', .. })
        ));
        assert!(matches!(
            parse_positions(BankKind::Index, "0123"),
            Err(SigabaError::PositionLength { len: 4, .. })
        ));
    }

    #[test]
    fn test_paths_are_inverse() {
        let specs = parse_order(BankKind::Cipher, "3R1N2R0N4R").unwrap();
        let mut bank = RotorBank::big(BankKind::Cipher, &specs);
        bank.set_positions(&[3, 17, 0, 25, 9]);
        for s in 0..26 {
            assert_eq!(bank.decrypt_path(bank.encrypt_path(s)), s);
        }
    }

    #[test]
    fn test_position_string() {
        let specs = parse_order(BankKind::Index, "0N1N2N3N4N").unwrap();
        let mut bank = RotorBank::index(&specs);
        bank.set_positions(&[0, 1, 2, 3, 9]);
        assert_eq!(bank.position_string(), "01239");
        assert_eq!(bank.to_string(), "0N1N2N3N4N");
    }
}
