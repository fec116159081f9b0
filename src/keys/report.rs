//! Printable key report: labelled key pairs followed by SQL statements.
//!
//! The SQL is text only. Values are interpolated without escaping, which
//! is sound only because nicknames are compile-time constants and keys
//! are base64 (`A-Z a-z 0-9 + / =`): neither can contain a quote.

use std::fmt;

use super::keypair::KeyPair;
use crate::error::KeyError;

/// Users whose public keys the report assigns, in print order.
pub const NICKNAMES: [&str; 2] = ["F", "N"];

/// A key pair tagged with the nickname of the user it belongs to.
#[derive(Debug, Clone)]
pub struct LabeledKeyPair {
    /// `users.nickname` of the owner.
    pub nickname: &'static str,
    /// The generated key pair.
    pub pair: KeyPair,
}

/// Key pairs for every user in [`NICKNAMES`].
#[derive(Debug, Clone)]
pub struct KeyReport {
    entries: Vec<LabeledKeyPair>,
}

impl KeyReport {
    /// Generates a fresh key pair per nickname.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Entropy`] if the OS random source fails.
    pub fn generate() -> Result<Self, KeyError> {
        let entries = NICKNAMES
            .iter()
            .map(|&nickname| -> Result<LabeledKeyPair, KeyError> {
                let pair = KeyPair::generate()?;
                tracing::debug!(nickname, public_key = %pair.public_b64(), "generated key pair");
                Ok(LabeledKeyPair { nickname, pair })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Returns the entries in print order.
    #[must_use]
    pub fn entries(&self) -> &[LabeledKeyPair] {
        &self.entries
    }

    /// Returns one `UPDATE` statement per entry.
    #[must_use]
    pub fn sql_statements(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| public_key_update(e.nickname, &e.pair.public_b64()))
            .collect()
    }
}

impl fmt::Display for KeyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{} key pair:", entry.nickname)?;
            writeln!(f, "Public key: {}", entry.pair.public_b64())?;
            writeln!(f, "Private key: {}", entry.pair.private_b64())?;
            writeln!(f)?;
        }
        writeln!(f, "SQL update statements:")?;
        for statement in self.sql_statements() {
            writeln!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// Renders the statement assigning `public_key_b64` to `nickname`.
#[must_use]
pub fn public_key_update(nickname: &str, public_key_b64: &str) -> String {
    format!("UPDATE users SET public_key = '{public_key_b64}' WHERE nickname = '{nickname}';")
}
