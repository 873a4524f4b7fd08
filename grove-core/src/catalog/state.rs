//! Installed-state file management (state.yaml)
//!
//! Tracks which groups are marked installed so listings can
//! partition the catalog into installed and available subsets.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the installed-state store inside a grove root
pub const STATE_FILE: &str = "state.yaml";

/// The state file tracks installed groups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledState {
    /// API version for schema compatibility
    pub api_version: String,
    /// When this state file was last updated
    pub generated: String,
    /// Groups currently marked installed
    pub installed: Vec<InstalledGroup>,
}

/// An installed group record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledGroup {
    /// Group identifier
    pub id: String,
    /// When the group was marked installed
    pub marked_at: String,
}

impl Default for InstalledState {
    fn default() -> Self {
        Self {
            api_version: "grove.dev/v1".to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
            installed: Vec::new(),
        }
    }
}

impl InstalledState {
    /// Load the state file or return default if not found
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))
    }

    /// Save the state file to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut state = self.clone();
        state.generated = chrono::Utc::now().to_rfc3339();

        let content = serde_yaml_ng::to_string(&state)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write state file: {}", path.display()))?;

        Ok(())
    }

    /// Mark a group installed
    pub fn mark_installed(&mut self, id: &str) {
        // Replace existing entry if present
        self.installed.retain(|e| e.id != id);

        self.installed.push(InstalledGroup {
            id: id.to_string(),
            marked_at: chrono::Utc::now().to_rfc3339(),
        });
    }

    /// Remove a group from the installed set
    pub fn mark_removed(&mut self, id: &str) {
        self.installed.retain(|e| e.id != id);
    }

    /// Check if a group is marked installed
    pub fn is_installed(&self, id: &str) -> bool {
        self.installed.iter().any(|e| e.id == id)
    }
}
