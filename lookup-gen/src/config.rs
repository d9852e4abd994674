//! Generator Configuration
//!
//! Defines the parameters of a generated benchmark program.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::template::CountLiteral;
use crate::{GenError, GenResult};

/// Configuration for the lookup benchmark generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bound of both nested loops; the closure is called `count * count` times.
    pub count: u64,

    /// Path of the generated program. Overwritten if it exists.
    pub output: PathBuf,

    /// Alphabet for the leading identifier slots.
    pub letters: Vec<char>,

    /// Number of leading letter slots in each identifier.
    pub letter_slots: usize,

    /// Size of the trailing digit range (`0..digits`).
    pub digits: u32,

    /// Emit `print val;` after each inner loop.
    pub print_val: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: 2000,
            output: PathBuf::from("lookup.lox"),
            letters: ('a'..='z').collect(),
            letter_slots: 3,
            digits: 2,
            print_val: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON configuration file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Self::from_json(&content)
            .map_err(|e| GenError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parses a JSON configuration string.
    pub fn from_json(content: &str) -> GenResult<Self> {
        serde_json::from_str(content).map_err(|e| GenError::Config(e.to_string()))
    }

    /// Checks that the configuration describes a well-formed program.
    pub fn validate(&self) -> GenResult<()> {
        if self.letters.is_empty() {
            return Err(GenError::Config("alphabet is empty".to_string()));
        }
        for (i, c) in self.letters.iter().enumerate() {
            if !c.is_ascii_lowercase() {
                return Err(GenError::Config(format!(
                    "'{}' is not a lowercase ASCII letter",
                    c
                )));
            }
            if self.letters[..i].contains(c) {
                return Err(GenError::Config(format!("duplicate letter '{}'", c)));
            }
        }
        if self.letter_slots == 0 {
            return Err(GenError::Config(
                "at least one letter slot is required".to_string(),
            ));
        }
        if self.digits == 0 || self.digits > 10 {
            return Err(GenError::Config(format!(
                "digit range must be between 1 and 10, got {}",
                self.digits
            )));
        }
        CountLiteral::new(self.count)?;
        self.identifier_count()?;
        Ok(())
    }

    /// Number of identifiers the configuration produces.
    pub fn identifier_count(&self) -> GenResult<usize> {
        let slots = u32::try_from(self.letter_slots).ok();
        slots
            .and_then(|slots| self.letters.len().checked_pow(slots))
            .and_then(|n| n.checked_mul(self.digits as usize))
            .ok_or_else(|| GenError::Config("identifier space is too large".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.identifier_count().unwrap(), 26 * 26 * 26 * 2);
        assert_eq!(config.output, PathBuf::from("lookup.lox"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "count": 10, "letters": ["x", "y"] }"#).unwrap();
        assert_eq!(config.count, 10);
        assert_eq!(config.letters, vec!['x', 'y']);
        assert_eq!(config.letter_slots, 3);
        assert_eq!(config.digits, 2);
        assert!(!config.print_val);
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = Config::from_json(r#"{ "count": -1 }"#).unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn test_fractional_count_rejected() {
        let err = Config::from_json(r#"{ "count": 2.5 }"#).unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn test_invalid_alphabets() {
        let cases = [
            vec![],
            vec!['a', 'a'],
            vec!['a', '1'],
            vec!['é'],
            vec!['A'],
            vec!['_'],
            vec!['a', 'B', '_'],
        ];
        for letters in cases {
            let config = Config {
                letters: letters.clone(),
                ..Config::default()
            };
            assert!(
                matches!(config.validate(), Err(GenError::Config(_))),
                "alphabet {:?} should be rejected",
                letters
            );
        }
    }

    #[test]
    fn test_lowercase_alphabet_accepted() {
        let config = Config {
            letters: vec!['x', 'q', 'm'],
            ..Config::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_config_still_loads() {
        // loading does not validate, so a broken file can be inspected
        let config = Config::from_json(r#"{ "digits": 0, "letters": ["A"] }"#).unwrap();
        assert!(config.validate().is_err());

        let printed = serde_json::to_string_pretty(&config).unwrap();
        assert!(printed.contains("\"digits\": 0"));
        assert!(printed.contains("\"A\""));
    }

    #[test]
    fn test_invalid_digit_ranges() {
        for digits in [0, 11] {
            let config = Config {
                digits,
                ..Config::default()
            };
            assert!(matches!(config.validate(), Err(GenError::Config(_))));
        }
    }

    #[test]
    fn test_zero_letter_slots_rejected() {
        let config = Config {
            letter_slots: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(GenError::Config(_))));
    }

    #[test]
    fn test_identifier_space_overflow() {
        let config = Config {
            letter_slots: 64,
            ..Config::default()
        };
        assert!(matches!(config.identifier_count(), Err(GenError::Config(_))));
    }

    #[test]
    fn test_zero_count_is_valid() {
        let config = Config {
            count: 0,
            ..Config::default()
        };
        config.validate().unwrap();
    }
}
