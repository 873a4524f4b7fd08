//! Grove group commands
//!
//! Implements the list, info, mark, and init subcommands on top of
//! the core catalog and selection engine.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing::info;

use grove_core::catalog::{
    CatalogSource, FileCatalog, Group, InstalledState, CATALOG_DIR, GROVE_DIR_ENV,
};
use grove_core::selection::{SelectionCriteria, Selector};

/// Starter catalog written by `grove init`
const STARTER_CATALOG: &str = include_str!("../fixtures/init/starter-groups.yaml");

/// Mark subcommand for recording installed state
#[derive(Subcommand, Debug)]
pub enum MarkCommand {
    /// Mark groups as installed
    Install {
        /// Group ids to mark
        #[clap(required = true)]
        ids: Vec<String>,
    },

    /// Mark groups as removed
    Remove {
        /// Group ids to unmark
        #[clap(required = true)]
        ids: Vec<String>,
    },
}

impl MarkCommand {
    pub fn execute(self, grove_dir: Option<&Path>) -> Result<()> {
        match self {
            MarkCommand::Install { ids } => execute_mark_install(grove_dir, &ids),
            MarkCommand::Remove { ids } => execute_mark_remove(grove_dir, &ids),
        }
    }
}

/// Table row for group listings
#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Resolve the selection against the discovered catalog
fn select_groups(
    grove_dir: Option<&Path>,
    patterns: Vec<String>,
    available: bool,
    installed: bool,
    hidden: bool,
) -> Result<Vec<Group>> {
    // Scope conflicts are rejected at the clap boundary already, but
    // the criteria constructor revalidates
    let criteria = SelectionCriteria::from_flags(patterns, available, installed, hidden)?;

    let catalog = FileCatalog::discover(grove_dir)?;
    let groups = catalog.load()?;

    let selector = Selector::default();
    let selected = selector
        .select(&groups, &criteria)
        .into_iter()
        .cloned()
        .collect();

    Ok(selected)
}

pub fn execute_list(
    grove_dir: Option<&Path>,
    patterns: Vec<String>,
    available: bool,
    installed: bool,
    hidden: bool,
    json_output: bool,
) -> Result<()> {
    let results = select_groups(grove_dir, patterns, available, installed, hidden)?;

    if results.is_empty() {
        println!("No groups found.");
        return Ok(());
    }

    if json_output {
        let json_results: Vec<serde_json::Value> = results
            .iter()
            .map(|group| {
                serde_json::json!({
                    "id": group.id,
                    "name": group.name,
                    "installed": group.installed,
                    "userVisible": group.user_visible,
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&json_results)?);
    } else {
        println!("Found {} group(s):\n", results.len());

        let table_rows: Vec<GroupRow> = results
            .iter()
            .map(|group| {
                let desc = group.short_description();
                let truncated_desc = if desc.len() > 50 {
                    format!("{}...", &desc[..47])
                } else {
                    desc.to_string()
                };

                GroupRow {
                    id: group.id.clone(),
                    name: group.name.clone(),
                    status: group.status_display().to_string(),
                    description: truncated_desc,
                }
            })
            .collect();

        let table = Table::new(&table_rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();

        println!("{table}");
    }

    Ok(())
}

pub fn execute_info(
    grove_dir: Option<&Path>,
    patterns: Vec<String>,
    available: bool,
    installed: bool,
    hidden: bool,
    json_output: bool,
) -> Result<()> {
    let results = select_groups(grove_dir, patterns, available, installed, hidden)?;

    if results.is_empty() {
        println!("No groups found.");
        return Ok(());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for group in &results {
        println!();
        println!("Group:  {}", group.name);
        println!("Id:     {}", group.id);
        println!("Status: {}", group.status_display());

        if !group.user_visible {
            println!("Hidden: yes");
        }

        if !group.description.is_empty() {
            println!();
            println!("Description:");
            for line in group.description.lines() {
                println!("  {line}");
            }
        }

        if !group.packages.is_empty() {
            println!();
            println!("Packages:");
            for package in &group.packages {
                println!("  {package}");
            }
        }
    }

    Ok(())
}

fn execute_mark_install(grove_dir: Option<&Path>, ids: &[String]) -> Result<()> {
    let catalog = FileCatalog::discover(grove_dir)?;
    let groups = catalog.load()?;
    let mut state = InstalledState::load_from_path(&catalog.state_path())?;

    // Resolve every id up front; the state file changes all or nothing
    let mut targets: Vec<&Group> = Vec::new();
    for id in ids {
        targets.push(find_group(&groups, id)?);
    }

    for group in &targets {
        if !group.installed {
            state.mark_installed(&group.id);
        }
    }

    state.save_to_path(&catalog.state_path())?;

    for group in targets {
        if group.installed {
            println!("Group '{}' is already marked installed.", group.id);
        } else {
            println!("Marked '{}' installed.", group.id);
        }
    }

    Ok(())
}

fn execute_mark_remove(grove_dir: Option<&Path>, ids: &[String]) -> Result<()> {
    let catalog = FileCatalog::discover(grove_dir)?;
    let groups = catalog.load()?;
    let mut state = InstalledState::load_from_path(&catalog.state_path())?;

    // Resolve and check every id up front; the state file changes all
    // or nothing
    let mut targets: Vec<&Group> = Vec::new();
    for id in ids {
        let group = find_group(&groups, id)?;
        if !group.installed {
            bail!("Group '{}' is not marked installed.", group.id);
        }
        targets.push(group);
    }

    for group in &targets {
        state.mark_removed(&group.id);
    }

    state.save_to_path(&catalog.state_path())?;

    for group in targets {
        println!("Marked '{}' removed.", group.id);
    }

    Ok(())
}

/// Resolve a group id exactly, ignoring case
fn find_group<'a>(groups: &'a [Group], id: &str) -> Result<&'a Group> {
    groups
        .iter()
        .find(|g| g.id.eq_ignore_ascii_case(id))
        .with_context(|| format!("Group '{id}' not found in catalog"))
}

pub fn execute_init(grove_dir: Option<&Path>) -> Result<()> {
    let root: PathBuf = match grove_dir {
        Some(dir) => dir.to_path_buf(),
        None => match std::env::var(GROVE_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from(".grove"),
        },
    };

    let catalog_dir = root.join(CATALOG_DIR);
    if catalog_dir.exists() {
        println!(
            "Grove directory already initialized ({} exists)",
            catalog_dir.display()
        );
        return Ok(());
    }

    info!("Initializing grove directory at {}", root.display());

    std::fs::create_dir_all(&catalog_dir).with_context(|| {
        format!(
            "Failed to create catalog directory: {}",
            catalog_dir.display()
        )
    })?;

    std::fs::write(catalog_dir.join("starter-groups.yaml"), STARTER_CATALOG)
        .context("Failed to write starter catalog")?;

    println!("✅ Initialized grove directory");
    println!("   Location: {}", root.display());
    println!("   Catalogs: {}", catalog_dir.display());
    println!();
    println!("   Run 'grove list' to browse groups.");
    println!("   Run 'grove mark install <id>' to record installed groups.");

    Ok(())
}
