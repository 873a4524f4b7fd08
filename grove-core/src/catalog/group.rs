//! Group catalog parsing
//!
//! A catalog file lists the package groups one source provides, with
//! their display names, visibility, and member packages.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A group catalog file (catalog/*.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCatalog {
    /// API version for schema compatibility
    pub api_version: String,

    /// Kind (GroupCatalog)
    pub kind: String,

    /// When the catalog was generated
    #[serde(default)]
    pub generated: Option<String>,

    /// Group entries in this catalog
    pub groups: Vec<GroupEntry>,
}

/// One group as declared by a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntry {
    /// Unique group identifier
    pub id: String,

    /// Human-readable display name
    pub name: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Whether the group appears in default listings
    #[serde(default = "default_visible")]
    pub user_visible: bool,

    /// Member package names
    #[serde(default)]
    pub packages: Vec<String>,
}

fn default_visible() -> bool {
    true
}

impl Default for GroupCatalog {
    fn default() -> Self {
        Self {
            api_version: "grove.dev/v1".to_string(),
            kind: "GroupCatalog".to_string(),
            generated: Some(chrono::Utc::now().to_rfc3339()),
            groups: Vec::new(),
        }
    }
}

impl GroupCatalog {
    /// Parse a catalog from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content).context("Failed to parse group catalog YAML")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).context("Failed to serialize group catalog")
    }
}

/// A group with its runtime state attached
///
/// Built by the catalog provider from a catalog entry plus the
/// installed-state store. The `id` is the primary key: two groups
/// with the same id are the same group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    pub user_visible: bool,
    pub installed: bool,
    pub packages: Vec<String>,
}

impl Group {
    /// Attach installed state to a catalog entry
    pub fn from_entry(entry: GroupEntry, installed: bool) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            user_visible: entry.user_visible,
            installed,
            packages: entry.packages,
        }
    }

    /// Status label for listings
    pub fn status_display(&self) -> &'static str {
        if self.installed {
            "installed"
        } else {
            "available"
        }
    }

    /// Truncate description to first line
    pub fn short_description(&self) -> &str {
        self.description
            .lines()
            .next()
            .unwrap_or(&self.description)
            .trim()
    }
}
