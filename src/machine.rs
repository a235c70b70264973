//! Sigaba: the cryptological core of the ECM Mark II.
//!
//! Orchestrates the cipher, control and index banks. Every processed
//! character passes through the cipher bank, then the cipher bank steps
//! under control of the control and index banks, then the control bank
//! steps like an odometer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bank::{parse_order, parse_positions, BankKind, RotorBank};
use crate::error::SigabaError;
use crate::text::{filter_in, filter_out};
use crate::wiring::{
    BANK_SIZE, CONTROL_HOME, CONTROL_INDEX_2900, CONTROL_INDEX_889, DISCONNECTED_2900,
    INDEX_MAGNETS,
};

/// Processing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Machine variant.
///
/// The CSP-889 and CSP-2900 differ in active contacts, control to index
/// wiring and the turning direction of cipher rotors 1 and 3. `CspNone` is
/// the middle position of the 889/2900 switch; it has no wiring of its own
/// and steps exactly like a CSP-2900.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MachineType {
    #[default]
    #[serde(rename = "CSP889")]
    Csp889,
    #[serde(rename = "CSP2900")]
    Csp2900,
    #[serde(rename = "CSPNONE")]
    CspNone,
}

/// Per-variant stepping wiring.
struct Coupling {
    /// Energised control contacts, inclusive.
    first_contact: usize,
    last_contact: usize,
    control_index: &'static [usize; 26],
    /// Control outputs with no wire to the index bank.
    disconnected: &'static [usize],
    /// Rotation applied to each cipher rotor whose magnet fires.
    rotation: [i32; BANK_SIZE],
}

static COUPLING_889: Coupling = Coupling {
    first_contact: 5,
    last_contact: 8,
    control_index: &CONTROL_INDEX_889,
    disconnected: &[],
    rotation: [1, 1, 1, 1, 1],
};

static COUPLING_2900: Coupling = Coupling {
    first_contact: 3,
    last_contact: 8,
    control_index: &CONTROL_INDEX_2900,
    disconnected: &DISCONNECTED_2900,
    rotation: [1, -1, 1, -1, 1],
};

impl MachineType {
    fn coupling(self) -> &'static Coupling {
        match self {
            MachineType::Csp889 => &COUPLING_889,
            MachineType::Csp2900 | MachineType::CspNone => &COUPLING_2900,
        }
    }

    /// The variant's switch label.
    pub fn name(self) -> &'static str {
        match self {
            MachineType::Csp889 => "CSP889",
            MachineType::Csp2900 => "CSP2900",
            MachineType::CspNone => "CSPNONE",
        }
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MachineType {
    type Err = SigabaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CSP889" => Ok(MachineType::Csp889),
            "CSP2900" => Ok(MachineType::Csp2900),
            "CSPNONE" => Ok(MachineType::CspNone),
            other => Err(SigabaError::UnknownMachine(other.to_string())),
        }
    }
}

/// The ECM Mark II cipher machine.
///
/// # Preconditions
///
/// The constructor rejects malformed order strings, but it does not check
/// that a big rotor is used only once across the cipher and control banks,
/// nor that index rotors are distinct. That is the job of
/// [`MachineSettings::validate`](crate::MachineSettings::validate).
///
/// # Examples
///
/// ```
/// use sigaba::{Direction, MachineType, Sigaba};
///
/// let mut machine =
///     Sigaba::new("0N1N2N3N4N", "5N6N7N8N9N", "0N1N2N3N4N", MachineType::Csp889).unwrap();
/// machine.zeroize();
/// let cipher = machine.process("HELLO WORLD", Direction::Encrypt);
/// assert_eq!(cipher, "FLQGFQUEQCH");
///
/// machine.zeroize();
/// assert_eq!(machine.process(&cipher, Direction::Decrypt), "HELLO WORLD");
/// ```
#[derive(Debug, Clone)]
pub struct Sigaba {
    cipher: RotorBank<26>,
    control: RotorBank<26>,
    index: RotorBank<10>,
    machine: MachineType,
    cipher_count: u32,
    trace: bool,
}

impl Sigaba {
    /// Builds a machine from three order strings.
    ///
    /// Each order string holds five `(rotor digit, orientation)` pairs where
    /// orientation is `N` (normal) or `R` (reversed). All rotors start at
    /// position 0 (`A` / `0`).
    ///
    /// # Parameters
    /// - `cipher_order`: Cipher bank rotors, digits `0..=9`.
    /// - `control_order`: Control bank rotors, digits `0..=9`.
    /// - `index_order`: Index bank rotors, digits `0..=4`.
    /// - `machine`: Machine variant.
    ///
    /// # Errors
    /// Returns an order-format error if any string is malformed.
    pub fn new(
        cipher_order: &str,
        control_order: &str,
        index_order: &str,
        machine: MachineType,
    ) -> Result<Self, SigabaError> {
        let cipher = parse_order(BankKind::Cipher, cipher_order)?;
        let control = parse_order(BankKind::Control, control_order)?;
        let index = parse_order(BankKind::Index, index_order)?;
        let sigaba = Sigaba {
            cipher: RotorBank::big(BankKind::Cipher, &cipher),
            control: RotorBank::big(BankKind::Control, &control),
            index: RotorBank::index(&index),
            machine,
            cipher_count: 0,
            trace: false,
        };
        debug!(
            cipher = %sigaba.cipher,
            control = %sigaba.control,
            index = %sigaba.index,
            machine = %machine,
            "machine assembled"
        );
        Ok(sigaba)
    }

    // ──────── Positions ────────

    /// Sets every cipher and control rotor to `O`.
    pub fn zeroize(&mut self) {
        let home = [CONTROL_HOME; BANK_SIZE];
        self.apply_cipher_positions(&home);
        self.control.set_positions(&home);
    }

    /// Sets the cipher bank from five letters `A..Z`.
    ///
    /// Changing rotor 0 or 4 clears the cipher counter.
    ///
    /// # Errors
    /// Returns a position-format error for malformed strings.
    pub fn set_cipher_pos(&mut self, pos: &str) -> Result<(), SigabaError> {
        let positions = parse_positions(BankKind::Cipher, pos)?;
        self.apply_cipher_positions(&positions);
        Ok(())
    }

    /// Sets the control bank from five letters `A..Z`.
    ///
    /// # Errors
    /// Returns a position-format error for malformed strings.
    pub fn set_control_pos(&mut self, pos: &str) -> Result<(), SigabaError> {
        let positions = parse_positions(BankKind::Control, pos)?;
        self.control.set_positions(&positions);
        Ok(())
    }

    /// Sets the index bank from five digits `0..9`.
    ///
    /// # Errors
    /// Returns a position-format error for malformed strings.
    pub fn set_index_pos(&mut self, pos: &str) -> Result<(), SigabaError> {
        let positions = parse_positions(BankKind::Index, pos)?;
        self.index.set_positions(&positions);
        Ok(())
    }

    /// Cipher bank positions as letters.
    pub fn cipher_pos(&self) -> String {
        self.cipher.position_string()
    }

    /// Control bank positions as letters.
    pub fn control_pos(&self) -> String {
        self.control.position_string()
    }

    /// Index bank positions as digits.
    pub fn index_pos(&self) -> String {
        self.index.position_string()
    }

    /// The cipher bank.
    pub fn cipher_bank(&self) -> &RotorBank<26> {
        &self.cipher
    }

    /// The control bank.
    pub fn control_bank(&self) -> &RotorBank<26> {
        &self.control
    }

    /// The index bank.
    pub fn index_bank(&self) -> &RotorBank<10> {
        &self.index
    }

    /// The machine variant.
    pub fn machine_type(&self) -> MachineType {
        self.machine
    }

    /// Characters processed since cipher rotor 0 or 4 last moved.
    ///
    /// Mirrors the machine's counter display; it never influences output.
    pub fn cipher_count(&self) -> u32 {
        self.cipher_count
    }

    fn apply_cipher_positions(&mut self, positions: &[usize; BANK_SIZE]) {
        let current = self.cipher.positions();
        if current[0] != positions[0] || current[4] != positions[4] {
            self.cipher_count = 0;
        }
        self.cipher.set_positions(positions);
    }

    // ──────── Trace ────────

    /// Reports bank positions after every step as `info` events.
    pub fn start_trace(&mut self) {
        self.trace = true;
    }

    /// Stops position reporting.
    pub fn stop_trace(&mut self) {
        self.trace = false;
    }

    fn emit_trace(&self) {
        if self.trace {
            info!(
                cipher = %self.cipher.position_string(),
                control = %self.control.position_string(),
                index = %self.index.position_string(),
                "rotor positions"
            );
        }
    }

    // ──────── Processing ────────

    /// Encrypts or decrypts a message, stepping the rotors once per
    /// character that survives filtering.
    ///
    /// # Parameters
    /// - `text`: Arbitrary text; characters other than letters and spaces
    ///   are dropped.
    /// - `direction`: Whether to encipher or decipher.
    ///
    /// # Returns
    /// The ciphertext, or the plaintext with word spaces restored.
    pub fn process(&mut self, text: &str, direction: Direction) -> String {
        let filtered = filter_in(direction, text);
        let mut out = String::with_capacity(filtered.len());
        for c in filtered.bytes() {
            let symbol = self.cipher_path(direction, (c - b'A') as usize);
            out.push((b'A' + symbol as u8) as char);
            self.step_cipher_bank();
            self.step_control_bank();
            self.cipher_count = self.cipher_count.saturating_add(1);
            self.emit_trace();
        }
        filter_out(direction, out)
    }

    /// Shorthand for [`process`](Self::process) with [`Direction::Encrypt`].
    pub fn encrypt(&mut self, text: &str) -> String {
        self.process(text, Direction::Encrypt)
    }

    /// Shorthand for [`process`](Self::process) with [`Direction::Decrypt`].
    pub fn decrypt(&mut self, text: &str) -> String {
        self.process(text, Direction::Decrypt)
    }

    /// Navy key-list initialization.
    ///
    /// Zeroizes the cipher and control banks, then dials each control rotor
    /// in turn to its target letter one click at a time. Every click steps
    /// the cipher bank once; the control odometer does not run.
    ///
    /// # Errors
    /// Returns a position-format error if `control_pos` is malformed; the
    /// machine is left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigaba::{MachineType, Sigaba};
    ///
    /// let mut machine =
    ///     Sigaba::new("0N1N2N3N4N", "5N6N7N8N9N", "0N1N2N3N4N", MachineType::Csp889).unwrap();
    /// machine.navy_init("ABCDE").unwrap();
    /// assert_eq!(machine.control_pos(), "ABCDE");
    /// assert_eq!(machine.encrypt("HELLO WORLD"), "COTUCRAXLVI");
    /// ```
    pub fn navy_init(&mut self, control_pos: &str) -> Result<(), SigabaError> {
        let targets = parse_positions(BankKind::Control, control_pos)?;
        self.zeroize();
        for (slot, &target) in targets.iter().enumerate() {
            while self.control.rotor(slot).position() != target {
                self.step_cipher_bank();
                self.control.rotor_mut(slot).rotate(1);
                self.emit_trace();
            }
        }
        Ok(())
    }

    fn cipher_path(&self, direction: Direction, symbol: usize) -> usize {
        match direction {
            Direction::Encrypt => self.cipher.encrypt_path(symbol),
            Direction::Decrypt => self.cipher.decrypt_path(symbol),
        }
    }

    // ──────── Stepping ────────

    /// Moves the control bank like an odometer keyed on `O`.
    ///
    /// Rotor 2 always steps. Rotor 3 steps when rotor 2 is at home, and
    /// rotor 1 steps when rotors 2 and 3 are both at home. Rotors 0 and 4
    /// never move.
    fn step_control_bank(&mut self) {
        if self.control.rotor(2).position() == CONTROL_HOME {
            if self.control.rotor(3).position() == CONTROL_HOME {
                self.control.rotor_mut(1).rotate(1);
            }
            self.control.rotor_mut(3).rotate(1);
        }
        self.control.rotor_mut(2).rotate(1);
    }

    /// Moves at least one cipher rotor: up to four on a CSP-889, up to all
    /// five on a CSP-2900.
    ///
    /// Several contacts can reach the same magnet at once, so all magnets
    /// are evaluated before any rotor turns; a magnet fires once no matter
    /// how many paths energise it.
    fn step_cipher_bank(&mut self) {
        let coupling = self.machine.coupling();
        let mut magnets = [false; BANK_SIZE];
        for contact in coupling.first_contact..=coupling.last_contact {
            let k = self.control.decrypt_path(contact);
            if coupling.disconnected.contains(&k) {
                continue;
            }
            let out = self.index.encrypt_path(coupling.control_index[k]);
            magnets[INDEX_MAGNETS[out] - 1] = true;
        }

        for (slot, &fired) in magnets.iter().enumerate() {
            if fired {
                self.cipher.rotor_mut(slot).rotate(coupling.rotation[slot]);
                if slot == 0 || slot == BANK_SIZE - 1 {
                    self.cipher_count = 0;
                }
            }
        }
    }
}

impl fmt::Display for Sigaba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cipher Order:     {}", self.cipher)?;
        writeln!(f, "Control Order:    {}", self.control)?;
        writeln!(f, "Index Order:      {}", self.index)?;
        writeln!(f, "Machine type:     {}", self.machine)?;
        writeln!(f)?;
        writeln!(f, "Cipher Position:  {}", self.cipher_pos())?;
        writeln!(f, "Control Position: {}", self.control_pos())?;
        write!(f, "Index Position:   {}", self.index_pos())
    }
}
