//! Catalog loading and grove root discovery
//!
//! Merges the catalog files under a grove root into one snapshot and
//! overlays installed state from the state file.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{Group, GroupCatalog, InstalledState, STATE_FILE};

/// Environment variable overriding grove root discovery
pub const GROVE_DIR_ENV: &str = "GROVE_DIR";

/// Directory holding catalog files inside a grove root
pub const CATALOG_DIR: &str = "catalog";

/// A source of group snapshots
///
/// The selection engine works on whatever snapshot the source hands
/// it; implementations decide where groups come from.
pub trait CatalogSource {
    /// Load the full set of known groups
    fn load(&self) -> Result<Vec<Group>>;
}

/// File-backed catalog rooted at a grove directory
#[derive(Debug, Clone)]
pub struct FileCatalog {
    root: PathBuf,
}

impl FileCatalog {
    /// Create a catalog over an explicit root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the grove root
    ///
    /// Precedence: explicit override, then GROVE_DIR, then ./.grove,
    /// then the per-user config directory. Override and GROVE_DIR
    /// must point at an existing directory.
    pub fn discover(override_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = override_dir {
            if !dir.exists() {
                bail!("Grove directory does not exist: {}", dir.display());
            }
            return Ok(Self::new(dir));
        }

        if let Ok(env_dir) = std::env::var(GROVE_DIR_ENV) {
            let path = PathBuf::from(env_dir);
            if !path.exists() {
                bail!(
                    "{} points to a missing directory: {}",
                    GROVE_DIR_ENV,
                    path.display()
                );
            }
            return Ok(Self::new(path));
        }

        let local = Path::new(".grove");
        if local.exists() {
            return Ok(Self::new(local));
        }

        let config_dir = directories::ProjectDirs::from("", "", "grove")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| dirs::config_dir().map(|d| d.join("grove")))
            .context("Could not determine config directory")?;

        if config_dir.join(CATALOG_DIR).exists() {
            return Ok(Self::new(config_dir));
        }

        bail!("No grove directory found. Run 'grove init' to create one.")
    }

    /// The grove root this catalog reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the installed-state file under this root
    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    /// Path of the catalog directory under this root
    pub fn catalog_dir(&self) -> PathBuf {
        self.root.join(CATALOG_DIR)
    }

    /// Catalog files under this root, in stable filename order
    fn catalog_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.catalog_dir();
        if !dir.exists() {
            bail!(
                "No catalog directory at {}. Run 'grove init' to create one.",
                dir.display()
            );
        }

        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to read catalog directory: {}", dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            match path.extension().and_then(|s| s.to_str()) {
                Some("yaml") | Some("yml") => files.push(path),
                _ => {}
            }
        }

        // Merge order, and therefore duplicate precedence, follows
        // filename order
        files.sort();
        Ok(files)
    }
}

impl CatalogSource for FileCatalog {
    fn load(&self) -> Result<Vec<Group>> {
        let state = InstalledState::load_from_path(&self.state_path())?;

        let mut groups: Vec<Group> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for path in self.catalog_files()? {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
            let catalog = GroupCatalog::from_yaml(&content)
                .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

            for entry in catalog.groups {
                if !seen.insert(entry.id.clone()) {
                    warn!(
                        "Duplicate group id '{}' in {}, keeping first definition",
                        entry.id,
                        path.display()
                    );
                    continue;
                }

                let installed = state.is_installed(&entry.id);
                groups.push(Group::from_entry(entry, installed));
            }
        }

        debug!(
            "Loaded {} groups from {}",
            groups.len(),
            self.catalog_dir().display()
        );

        Ok(groups)
    }
}

#[cfg(test)]
mod provider_tests {
    use super::*;
    use tempfile::TempDir;

    fn base_catalog_yaml() -> &'static str {
        r#"
apiVersion: grove.dev/v1
kind: GroupCatalog
groups:
  - id: core
    name: Core System
    packages: [bash, coreutils]
  - id: games
    name: Games
"#
    }

    fn extra_catalog_yaml() -> &'static str {
        r#"
apiVersion: grove.dev/v1
kind: GroupCatalog
groups:
  - id: games
    name: Games (duplicate definition)
  - id: web-server
    name: Web Server
"#
    }

    fn write_root(temp_dir: &TempDir) -> PathBuf {
        let root = temp_dir.path().join("grove");
        let catalog_dir = root.join(CATALOG_DIR);
        std::fs::create_dir_all(&catalog_dir).unwrap();
        std::fs::write(catalog_dir.join("10-base.yaml"), base_catalog_yaml()).unwrap();
        std::fs::write(catalog_dir.join("20-extra.yaml"), extra_catalog_yaml()).unwrap();
        root
    }

    #[test]
    fn test_load_merges_catalog_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = write_root(&temp_dir);

        let groups = FileCatalog::new(&root).load().unwrap();

        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["core", "games", "web-server"]);
    }

    #[test]
    fn test_duplicate_id_keeps_first_definition() {
        let temp_dir = TempDir::new().unwrap();
        let root = write_root(&temp_dir);

        let groups = FileCatalog::new(&root).load().unwrap();

        let games = groups.iter().find(|g| g.id == "games").unwrap();
        assert_eq!(games.name, "Games");
    }

    #[test]
    fn test_load_applies_installed_state() {
        let temp_dir = TempDir::new().unwrap();
        let root = write_root(&temp_dir);

        let mut state = InstalledState::default();
        state.mark_installed("core");
        state.save_to_path(&root.join(STATE_FILE)).unwrap();

        let groups = FileCatalog::new(&root).load().unwrap();

        assert!(groups.iter().find(|g| g.id == "core").unwrap().installed);
        assert!(!groups.iter().find(|g| g.id == "games").unwrap().installed);
    }

    #[test]
    fn test_load_without_state_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = write_root(&temp_dir);

        let groups = FileCatalog::new(&root).load().unwrap();
        assert!(groups.iter().all(|g| !g.installed));
    }

    #[test]
    fn test_load_rejects_malformed_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("grove");
        let catalog_dir = root.join(CATALOG_DIR);
        std::fs::create_dir_all(&catalog_dir).unwrap();
        std::fs::write(catalog_dir.join("broken.yaml"), "groups: [not, a, catalog").unwrap();

        let result = FileCatalog::new(&root).load();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_catalog_dir_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("grove");
        std::fs::create_dir_all(&root).unwrap();

        let result = FileCatalog::new(&root).load();
        assert!(result.is_err());
    }

    #[test]
    fn test_discover_with_override() {
        let temp_dir = TempDir::new().unwrap();
        let root = write_root(&temp_dir);

        let catalog = FileCatalog::discover(Some(&root)).unwrap();
        assert_eq!(catalog.root(), root.as_path());
    }

    #[test]
    fn test_discover_rejects_missing_override() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent");

        let result = FileCatalog::discover(Some(&missing));
        assert!(result.is_err());
    }
}
