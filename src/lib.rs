//! SIGABA (ECM Mark II) rotor cipher machine.
//!
//! The ECM Mark II enciphers each letter through a bank of five cipher
//! rotors. After every letter a control bank and an index bank decide which
//! cipher rotors turn, so the stepping is irregular and hard to predict.
//!
//! This crate emulates the CSP-889 and CSP-2900 variants and also provides
//! the "internal method" used to design rotor wirings by hand: a generator
//! that searches for such wirings and a checker that audits any wiring.
//!
//! # Architecture
//!
//! ```text
//! Rotor<N>     (keyed substitution wheel, 26 letters or 10 digits)
//!     ↕ five per bank
//! RotorBank    (cipher, control and index banks)
//!     ↕ coupled through fixed wiring tables
//! Sigaba       (filter in → cipher path → stepping → filter out)
//!
//! WiringGenerator / PermutationChecker   (independent of the machine)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt a message:
//!
//! ```
//! use sigaba::{MachineType, Sigaba};
//!
//! let mut machine =
//!     Sigaba::new("0N1N2N3N4N", "5N6N7N8N9N", "0N1N2N3N4N", MachineType::Csp889).unwrap();
//! machine.zeroize();
//! let cipher = machine.encrypt("HELLO WORLD");
//! assert_eq!(cipher, "FLQGFQUEQCH");
//!
//! machine.zeroize();
//! assert_eq!(machine.decrypt(&cipher), "HELLO WORLD");
//! ```
//!
//! Key a machine from settings, the way a key list would be read:
//!
//! ```
//! use sigaba::{MachineSettings, MachineType};
//!
//! let settings = MachineSettings {
//!     machine: MachineType::Csp2900,
//!     ..MachineSettings::default()
//! };
//! let mut machine = settings.build().unwrap();
//! assert_eq!(machine.encrypt("HELLO WORLD"), "FLMGUIGFVWW");
//! ```

#![deny(clippy::all)]

pub mod bank;
pub mod error;
pub mod internal_method;
pub mod rotor;
pub mod text;
pub mod wiring;

mod machine;
mod settings;

pub use bank::{BankKind, RotorBank, RotorSpec};
pub use error::SigabaError;
pub use internal_method::{GeneratedWiring, PermutationChecker, WiringGenerator};
pub use machine::{Direction, MachineType, Sigaba};
pub use rotor::{BigRotor, IndexRotor, Rotor};
pub use settings::MachineSettings;
