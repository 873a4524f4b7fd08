//! Grove Catalog - package group discovery and state tracking
//!
//! This module loads group catalogs from disk and tags each group
//! with its current installed state.
//!
//! # Overview
//!
//! The catalog system allows users to:
//! - Browse the package groups their sources provide
//! - Merge several catalog files into one snapshot
//! - Track which groups are marked installed via `state.yaml`
//!
//! # Architecture
//!
//! ```text
//! <grove root>/
//!     │
//!     ├── catalog/*.yaml  ← Group catalogs, one file per source
//!     └── state.yaml      ← Installed-state tracking
//!            │
//!            ▼
//!     FileCatalog::load()
//!            │
//!            ▼
//!     Vec<Group>          ← Merged snapshot, installed flags applied
//! ```

mod group;
mod provider;
mod state;

pub use group::{Group, GroupCatalog, GroupEntry};
pub use provider::{CatalogSource, FileCatalog, CATALOG_DIR, GROVE_DIR_ENV};
pub use state::{InstalledGroup, InstalledState, STATE_FILE};
