//! Remote-key name resolution for user-control frames.
//!
//! Resolution is layered over three immutable tables, checked in fixed
//! priority order:
//!
//! 1. the canonical table ([`user_control::CANONICAL_NAMES`]) with caller
//!    overrides merged in at construction (override wins on name collision),
//! 2. the alias table ([`aliases::ALIASES`]), resolving through one
//!    indirection to a canonical name or a literal code,
//! 3. the `0xHH` literal form.
//!
//! Input names are normalized first (lowercased, non-alphanumeric stripped),
//! so `"Volume-Up"`, `"volume up"`, and `"VOLUMEUP"` all resolve to the same
//! code.  Numeric input is validated as a plain byte.

pub mod aliases;
pub mod user_control;

use std::collections::HashMap;

use thiserror::Error;

use aliases::{AliasTarget, ALIASES};
use user_control::CANONICAL_NAMES;

pub use user_control::UserControlCode;

/// Error type for key resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The name matched no canonical entry, alias, or `0xHH` literal.
    #[error("unknown key: {0:?}")]
    UnknownKey(String),

    /// A numeric key code fell outside `[0, 255]`.
    #[error("key code out of range: {0}")]
    CodeOutOfRange(i64),
}

/// A key input as accepted by [`KeyTable::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// A raw code, validated as a byte.
    Code(i64),
    /// A key name, matched case/punctuation-insensitively.
    Name(String),
}

impl From<i64> for KeyInput {
    fn from(v: i64) -> Self {
        KeyInput::Code(v)
    }
}

impl From<u8> for KeyInput {
    fn from(v: u8) -> Self {
        KeyInput::Code(i64::from(v))
    }
}

impl From<&str> for KeyInput {
    fn from(s: &str) -> Self {
        KeyInput::Name(s.to_string())
    }
}

impl From<String> for KeyInput {
    fn from(s: String) -> Self {
        KeyInput::Name(s)
    }
}

/// Strips a key name down to its normalized form: lowercase alphanumeric.
pub fn normalize_key_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The layered key-name → code table, built once at construction.
#[derive(Debug, Clone)]
pub struct KeyTable {
    /// Canonical entries with overrides merged in, keyed by normalized name.
    canonical: HashMap<String, u8>,
}

impl KeyTable {
    /// Builds the table from the built-in canonical set alone.
    pub fn new() -> KeyTable {
        Self::with_overrides(&HashMap::new())
    }

    /// Builds the table with caller overrides merged last.
    ///
    /// Override keys are normalized before merging, so an override for
    /// `"Volume-Up"` replaces the built-in `volumeup` entry.
    pub fn with_overrides(overrides: &HashMap<String, u8>) -> KeyTable {
        let mut canonical: HashMap<String, u8> = CANONICAL_NAMES
            .iter()
            .map(|(name, code)| (name.to_string(), code.byte()))
            .collect();
        for (name, code) in overrides {
            canonical.insert(normalize_key_name(name), *code);
        }
        KeyTable { canonical }
    }

    /// Resolves any accepted key input to its control-code byte.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::CodeOutOfRange`] for numeric input outside
    /// `[0, 255]` and [`KeyError::UnknownKey`] for a name that matches no
    /// table entry or literal form.
    pub fn resolve(&self, input: impl Into<KeyInput>) -> Result<u8, KeyError> {
        match input.into() {
            KeyInput::Code(v) => u8::try_from(v).map_err(|_| KeyError::CodeOutOfRange(v)),
            KeyInput::Name(name) => self.resolve_name(&name),
        }
    }

    fn resolve_name(&self, name: &str) -> Result<u8, KeyError> {
        let normalized = normalize_key_name(name);
        if normalized.is_empty() {
            return Err(KeyError::UnknownKey(name.to_string()));
        }

        if let Some(code) = self.canonical.get(&normalized) {
            return Ok(*code);
        }

        if let Some((_, target)) = ALIASES.iter().find(|(alias, _)| *alias == normalized) {
            return match target {
                AliasTarget::Name(canonical_name) => self
                    .canonical
                    .get(*canonical_name)
                    .copied()
                    .ok_or_else(|| KeyError::UnknownKey(name.to_string())),
                AliasTarget::Code(code) => Ok(*code),
            };
        }

        if let Some(code) = parse_hex_literal(&normalized) {
            return Ok(code);
        }

        Err(KeyError::UnknownKey(name.to_string()))
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Matches the normalized `0xHH` literal form (one or two hex digits).
fn parse_hex_literal(normalized: &str) -> Option<u8> {
    let digits = normalized.strip_prefix("0x")?;
    if digits.is_empty() || digits.len() > 2 {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
