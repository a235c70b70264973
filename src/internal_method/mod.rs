//! Internal-method rotor wiring construction and auditing.
//!
//! A rotor wiring `perm` has differences `(perm[i] - i) mod N`. A wiring
//! laid out by the internal method uses every difference once when `N` is
//! odd; when `N` is even that is impossible, so one difference is used twice
//! and one is left out.

pub mod checker;
pub mod generator;
pub(crate) mod random;

pub use checker::PermutationChecker;
pub use generator::{GeneratedWiring, WiringGenerator};
