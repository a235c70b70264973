//! Machine key settings and their validation.
//!
//! A [`MachineSettings`] value is the daily key list: rotor orders, machine
//! variant and starting positions. Defaults match a machine fresh from the
//! zeroize switch with rotors in catalog order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bank::{parse_order, parse_positions, BankKind};
use crate::error::SigabaError;
use crate::machine::{MachineType, Sigaba};
use crate::wiring::{BIG_ROTOR_WIRINGS, INDEX_ROTOR_WIRINGS};

/// Rotor orders, variant and starting positions for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MachineSettings {
    pub cipher_order: String,
    pub control_order: String,
    pub index_order: String,
    pub machine: MachineType,
    pub cipher_pos: String,
    pub control_pos: String,
    pub index_pos: String,
    /// Dial the control bank with the navy procedure; `cipher_pos` is unused.
    pub navy_init: bool,
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings {
            cipher_order: "0N1N2N3N4N".to_string(),
            control_order: "5N6N7N8N9N".to_string(),
            index_order: "0N1N2N3N4N".to_string(),
            machine: MachineType::Csp889,
            cipher_pos: "OOOOO".to_string(),
            control_pos: "OOOOO".to_string(),
            index_pos: "00000".to_string(),
            navy_init: false,
        }
    }
}

impl MachineSettings {
    /// Parses settings from a JSON document. Missing keys take defaults.
    ///
    /// # Errors
    /// Returns [`SigabaError::Settings`] if the document is not valid JSON
    /// for this structure.
    pub fn from_json(json: &str) -> Result<Self, SigabaError> {
        serde_json::from_str(json).map_err(|e| SigabaError::Settings(e.to_string()))
    }

    /// Checks every order and position string.
    ///
    /// On top of the per-string format checks, no big rotor may appear
    /// twice across the cipher and control banks and no index rotor may
    /// appear twice.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), SigabaError> {
        let cipher = parse_order(BankKind::Cipher, &self.cipher_order)?;
        let control = parse_order(BankKind::Control, &self.control_order)?;
        let index = parse_order(BankKind::Index, &self.index_order)?;

        let mut big_used = [false; BIG_ROTOR_WIRINGS.len()];
        for spec in cipher.iter().chain(control.iter()) {
            if big_used[spec.wiring] {
                return Err(SigabaError::DuplicateBigRotor { rotor: spec.wiring });
            }
            big_used[spec.wiring] = true;
        }

        let mut index_used = [false; INDEX_ROTOR_WIRINGS.len()];
        for spec in index.iter() {
            if index_used[spec.wiring] {
                return Err(SigabaError::DuplicateIndexRotor { rotor: spec.wiring });
            }
            index_used[spec.wiring] = true;
        }

        parse_positions(BankKind::Cipher, &self.cipher_pos)?;
        parse_positions(BankKind::Control, &self.control_pos)?;
        parse_positions(BankKind::Index, &self.index_pos)?;
        Ok(())
    }

    /// Validates the settings and returns a machine ready to process text.
    ///
    /// # Errors
    /// Returns the first validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigaba::MachineSettings;
    ///
    /// let settings = MachineSettings {
    ///     cipher_pos: "ABCDE".to_string(),
    ///     control_pos: "ABCDE".to_string(),
    ///     ..MachineSettings::default()
    /// };
    /// let mut machine = settings.build().unwrap();
    /// assert_eq!(machine.encrypt("HELLO WORLD"), "PHXZJOJXYVA");
    /// ```
    pub fn build(&self) -> Result<Sigaba, SigabaError> {
        self.validate()?;
        let mut machine = Sigaba::new(
            &self.cipher_order,
            &self.control_order,
            &self.index_order,
            self.machine,
        )?;
        machine.set_index_pos(&self.index_pos)?;
        if self.navy_init {
            machine.navy_init(&self.control_pos)?;
        } else {
            machine.set_cipher_pos(&self.cipher_pos)?;
            machine.set_control_pos(&self.control_pos)?;
        }
        debug!(
            cipher = %machine.cipher_pos(),
            control = %machine.control_pos(),
            index = %machine.index_pos(),
            navy_init = self.navy_init,
            "machine keyed"
        );
        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MachineSettings::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_big_rotor_across_banks() {
        let settings = MachineSettings {
            control_order: "5N6N7N8N0R".to_string(),
            ..MachineSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SigabaError::DuplicateBigRotor { rotor: 0 })
        );
    }

    #[test]
    fn test_duplicate_index_rotor() {
        let settings = MachineSettings {
            index_order: "0N1N2N3N3R".to_string(),
            ..MachineSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SigabaError::DuplicateIndexRotor { rotor: 3 })
        );
    }

    #[test]
    fn test_bad_position_rejected() {
        let settings = MachineSettings {
            index_pos: "0000A".to_string(),
            ..MachineSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SigabaError::PositionChar {
                bank: BankKind::Index,
                found: 'A',
                ..
            })
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let settings =
            MachineSettings::from_json(r#"{ "machine": "CSP2900", "indexPos": "01234" }"#).unwrap();
        assert_eq!(settings.machine, MachineType::Csp2900);
        assert_eq!(settings.index_pos, "01234");
        assert_eq!(settings.cipher_order, "0N1N2N3N4N");
    }

    #[test]
    fn test_from_json_rejects_unknown_machine() {
        let result = MachineSettings::from_json(r#"{ "machine": "CSP999" }"#);
        assert!(matches!(result, Err(SigabaError::Settings(_))));
    }

    #[test]
    fn test_json_roundtrip_keys() {
        let json = serde_json::to_string(&MachineSettings::default()).unwrap();
        assert!(json.contains("\"cipherOrder\":\"0N1N2N3N4N\""));
        assert!(json.contains("\"machine\":\"CSP889\""));
        assert!(json.contains("\"navyInit\":false"));
    }

    #[test]
    fn test_build_default_is_zeroized() {
        let machine = MachineSettings::default().build().unwrap();
        assert_eq!(machine.cipher_pos(), "OOOOO");
        assert_eq!(machine.control_pos(), "OOOOO");
    }

    #[test]
    fn test_build_navy_init() {
        let settings = MachineSettings {
            navy_init: true,
            cipher_pos: "AAAAA".to_string(),
            control_pos: "ABCDE".to_string(),
            ..MachineSettings::default()
        };
        let mut machine = settings.build().unwrap();
        assert_eq!(machine.control_pos(), "ABCDE");
        assert_eq!(machine.cipher_pos(), "GNLYT");
        assert_eq!(machine.encrypt("HELLO WORLD"), "COTUCRAXLVI");
    }
}
