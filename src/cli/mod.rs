//! CLI commands
//!
//! Every command resolves the project from the current directory, loads
//! `canon/config.toml` and works against the JSON snapshot store.

pub mod audit;
pub mod document;
pub mod gate;
pub mod init;
pub mod integrity;
pub mod proposal;
pub mod score;

use crate::models::CanonConfig;
use crate::services::GovernanceService;
use crate::store::JsonFileStore;
use crate::Result;
use anyhow::Context;
use std::env;
use std::path::{Path, PathBuf};

/// Loaded project: root, config and service over the file store
pub struct Project {
    pub root: PathBuf,
    pub config: CanonConfig,
    pub service: GovernanceService<JsonFileStore>,
}

impl Project {
    /// Open the project rooted at the current directory
    pub fn open(operator: bool) -> Result<Self> {
        Self::open_at(&env::current_dir()?, operator)
    }

    pub fn open_at(root: &Path, operator: bool) -> Result<Self> {
        let config = CanonConfig::load(root)
            .with_context(|| format!("Failed to load config under {}", root.display()))?;
        let store_path = config.resolve_store_path(root);
        let store = JsonFileStore::open(&store_path)
            .with_context(|| format!("Failed to open store {}", store_path.display()))?;
        let service = GovernanceService::new(store, &config).operator_override(operator);

        Ok(Self {
            root: root.to_path_buf(),
            config,
            service,
        })
    }
}

pub(crate) fn separator() -> &'static str {
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
}
