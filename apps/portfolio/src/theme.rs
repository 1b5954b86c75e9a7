//! Theme preference persisted in a small JSON key-value file.
//!
//! Plain read-modify-write against the filesystem; the store has no
//! interaction with page composition. Reads fail soft to the default
//! preference, writes surface their error to the caller.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stored preference; missing or unreadable stores yield the default.
    pub fn get(&self) -> ThemePreference {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return ThemePreference::default(),
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!(
                "unreadable theme store {}: {err}; using default",
                self.path.display()
            );
            ThemePreference::default()
        })
    }

    pub fn set(&self, value: ThemePreference) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create theme store dir {}", parent.display()))?;
        }
        let raw = serde_json::to_string(&value)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("write theme store {}", self.path.display()))
    }

    /// Read-modify-write: flips the stored preference and returns the new one.
    pub fn toggle(&self) -> Result<ThemePreference> {
        let next = self.get().toggled();
        self.set(next)?;
        Ok(next)
    }
}
