use std::collections::HashMap;

use hrdesk_core::{AppError, AppResult};

use crate::{CanonicalRole, RoleKey};

/// Immutable lookup from legacy role labels to canonical role identifiers.
///
/// Tokens minted by older issuers carry display labels (`"Admin"`) where
/// newer ones carry identifiers (`"role_admin"`). Labels absent from the
/// table pass through unchanged. No alias target is itself remapped, so
/// normalizing twice yields the same sequence as normalizing once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleLabelMap {
    aliases: HashMap<String, String>,
}

impl RoleLabelMap {
    /// Returns the built-in table mapping each canonical display label to its key.
    #[must_use]
    pub fn builtin() -> Self {
        let aliases = CanonicalRole::all()
            .iter()
            .map(|role| (role.display_name().to_owned(), role.key().to_owned()))
            .collect();

        Self { aliases }
    }

    /// Returns the built-in table extended with additional `label -> key` pairs.
    ///
    /// Later pairs override earlier ones for the same label.
    pub fn with_aliases<I, L, K>(pairs: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (L, K)>,
        L: Into<String>,
        K: Into<String>,
    {
        let mut map = Self::builtin();

        for (label, key) in pairs {
            let label = label.into().trim().to_owned();
            if label.is_empty() {
                return Err(AppError::Validation(
                    "role label alias must not be empty".to_owned(),
                ));
            }

            let key = RoleKey::new(key)?;
            if label == key.as_str() {
                map.aliases.remove(&label);
                continue;
            }

            map.aliases.insert(label, key.into());
        }

        map.ensure_targets_are_terminal()?;
        Ok(map)
    }

    /// Maps one label to its canonical identifier.
    #[must_use]
    pub fn normalize_label<'a>(&'a self, label: &'a str) -> &'a str {
        self.aliases
            .get(label)
            .map(String::as_str)
            .unwrap_or(label)
    }

    /// Maps every label, preserving order, length and duplicates.
    #[must_use]
    pub fn normalize<S: AsRef<str>>(&self, labels: &[S]) -> Vec<String> {
        labels
            .iter()
            .map(|label| self.normalize_label(label.as_ref()).to_owned())
            .collect()
    }

    /// Returns the number of remapped labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns whether the table remaps nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    fn ensure_targets_are_terminal(&self) -> AppResult<()> {
        for (label, target) in &self.aliases {
            if let Some(next) = self.aliases.get(target) {
                return Err(AppError::Validation(format!(
                    "role label '{label}' maps to '{target}', which is itself remapped to '{next}'"
                )));
            }
        }

        Ok(())
    }
}

impl Default for RoleLabelMap {
    fn default() -> Self {
        Self::builtin()
    }
}
