//! Fixed wiring catalogs of the ECM Mark II.
//!
//! All tables are immutable process-wide constants, expressed as zero-based
//! symbol indices. Big rotors (cipher and control banks) permute 26 letters,
//! index rotors permute 10 digits.

/// Number of symbols on a big (cipher or control) rotor.
pub const BIG_ROTOR_SIZE: usize = 26;

/// Number of symbols on an index rotor.
pub const INDEX_ROTOR_SIZE: usize = 10;

/// Number of rotors in every bank.
pub const BANK_SIZE: usize = 5;

/// Control rotor home position, the letter `O`.
pub const CONTROL_HOME: usize = 14;

/// Big rotor wirings.
///
/// No surviving documentation gives the large rotors actually issued; these
/// are the wirings used by the Pampanito emulator.
#[rustfmt::skip]
pub const BIG_ROTOR_WIRINGS: [[usize; BIG_ROTOR_SIZE]; 10] = [
    [24, 2, 7, 11, 16, 18, 20, 6, 1, 3, 8, 23, 13, 25, 10, 4, 17, 15, 21, 9, 19, 0, 22, 5, 14, 12],
    [8, 13, 15, 23, 1, 22, 4, 19, 6, 20, 24, 18, 0, 14, 2, 7, 21, 11, 3, 12, 16, 10, 25, 9, 5, 17],
    [22, 13, 3, 17, 8, 14, 25, 15, 19, 0, 23, 7, 5, 9, 24, 16, 1, 12, 18, 21, 4, 10, 20, 2, 6, 11],
    [19, 25, 6, 7, 14, 1, 10, 17, 21, 20, 23, 11, 16, 3, 12, 15, 13, 5, 22, 2, 9, 24, 4, 8, 0, 18],
    [24, 22, 19, 0, 7, 17, 16, 9, 21, 11, 2, 4, 23, 20, 13, 6, 1, 8, 15, 25, 12, 18, 3, 5, 14, 10],
    [16, 18, 11, 17, 1, 19, 4, 10, 14, 6, 0, 8, 2, 5, 22, 24, 21, 12, 7, 9, 13, 23, 25, 20, 3, 15],
    [2, 7, 9, 3, 16, 8, 6, 13, 1, 18, 0, 10, 21, 19, 20, 14, 23, 5, 22, 11, 4, 15, 17, 12, 25, 24],
    [2, 3, 5, 0, 9, 23, 19, 8, 12, 13, 1, 4, 16, 7, 18, 20, 6, 17, 24, 11, 22, 25, 10, 21, 15, 14],
    [23, 7, 5, 4, 18, 25, 3, 13, 17, 1, 2, 6, 10, 16, 8, 9, 11, 19, 21, 12, 20, 14, 24, 0, 15, 22],
    [4, 25, 9, 16, 23, 12, 14, 6, 24, 19, 2, 18, 5, 17, 8, 20, 15, 21, 13, 0, 3, 11, 7, 22, 1, 10],
];

/// Index rotor wirings, as supplied by the government.
#[rustfmt::skip]
pub const INDEX_ROTOR_WIRINGS: [[usize; INDEX_ROTOR_SIZE]; 5] = [
    [7, 5, 9, 1, 4, 8, 2, 6, 3, 0],
    [3, 8, 1, 0, 5, 9, 2, 7, 6, 4],
    [4, 0, 8, 6, 1, 5, 3, 2, 9, 7],
    [3, 9, 8, 0, 5, 2, 6, 1, 7, 4],
    [6, 4, 9, 7, 1, 3, 5, 2, 8, 0],
];

/// Wiring from the left side of the control bank to the index bank on a CSP-889.
#[rustfmt::skip]
pub const CONTROL_INDEX_889: [usize; BIG_ROTOR_SIZE] =
    [9, 1, 2, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 7, 7, 8, 8, 8, 8, 8, 8];

/// Wiring from the left side of the control bank to the index bank on a CSP-2900.
///
/// `P`, `Q` and `R` are not connected; they hold 9 here and are skipped by
/// the stepping logic.
#[rustfmt::skip]
pub const CONTROL_INDEX_2900: [usize; BIG_ROTOR_SIZE] =
    [9, 1, 2, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6, 6, 9, 9, 9, 7, 7, 0, 0, 8, 8, 8, 8];

/// Control outputs left unconnected on a CSP-2900 (`P`, `Q`, `R`).
pub const DISCONNECTED_2900: [usize; 3] = [15, 16, 17];

/// Wiring from the right side of the index bank to the 1-based cipher
/// rotor stepping magnets.
pub const INDEX_MAGNETS: [usize; INDEX_ROTOR_SIZE] = [1, 5, 5, 4, 4, 3, 3, 2, 2, 1];

/// Returns the big rotor catalog as letter strings (`A` = 0).
pub fn big_rotor_symbols() -> Vec<String> {
    BIG_ROTOR_WIRINGS
        .iter()
        .map(|wiring| symbols_from(wiring, b'A'))
        .collect()
}

/// Returns the index rotor catalog as digit strings (`0` = 0).
pub fn index_rotor_symbols() -> Vec<String> {
    INDEX_ROTOR_WIRINGS
        .iter()
        .map(|wiring| symbols_from(wiring, b'0'))
        .collect()
}

fn symbols_from(wiring: &[usize], base: u8) -> String {
    wiring.iter().map(|&s| (base + s as u8) as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(wiring: &[usize]) -> bool {
        let mut seen = vec![false; wiring.len()];
        for &s in wiring {
            if s >= wiring.len() || seen[s] {
                return false;
            }
            seen[s] = true;
        }
        true
    }

    #[test]
    fn test_catalogs_are_permutations() {
        for wiring in BIG_ROTOR_WIRINGS.iter() {
            assert!(is_permutation(wiring));
        }
        for wiring in INDEX_ROTOR_WIRINGS.iter() {
            assert!(is_permutation(wiring));
        }
    }

    #[test]
    fn test_big_rotor_symbols() {
        let symbols = big_rotor_symbols();
        assert_eq!(symbols.len(), 10);
        assert_eq!(symbols[0], "YCHLQSUGBDIXNZKERPVJTAWFOM");
        assert_eq!(symbols[9], "EZJQXMOGYTCSFRIUPVNADLHWBK");
    }

    #[test]
    fn test_index_rotor_symbols() {
        let symbols = index_rotor_symbols();
        assert_eq!(symbols[0], "7591482630");
        assert_eq!(symbols[4], "6497135280");
    }

    #[test]
    fn test_coupling_tables_stay_in_index_range() {
        assert!(CONTROL_INDEX_889.iter().all(|&v| v < INDEX_ROTOR_SIZE));
        assert!(CONTROL_INDEX_2900.iter().all(|&v| v < INDEX_ROTOR_SIZE));
        for &k in DISCONNECTED_2900.iter() {
            assert_eq!(CONTROL_INDEX_2900[k], 9);
        }
    }

    #[test]
    fn test_magnets_are_one_based_slots() {
        assert!(INDEX_MAGNETS.iter().all(|&m| (1..=BANK_SIZE).contains(&m)));
    }
}
