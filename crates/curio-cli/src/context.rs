use std::path::{Path, PathBuf};

use anyhow::Context;
use curio_config::CurioConfig;
use curio_store::{Catalog, Store};

/// Resolved project state shared by all command handlers.
pub struct AppContext {
    pub project_root: PathBuf,
    pub config: CurioConfig,
    pub store: Store,
}

impl AppContext {
    /// Load configuration and open the source directory of `project_root`.
    pub fn init(project_root: PathBuf) -> anyhow::Result<Self> {
        let config = CurioConfig::load_with_dotenv(&project_root)
            .with_context(|| format!("failed to load configuration from {}", project_root.display()))?;
        let source_dir = config.source_dir(&project_root);
        let store = Store::open(&source_dir)
            .with_context(|| format!("cannot open source directory {}", source_dir.display()))?;
        tracing::debug!(root = %project_root.display(), source = %source_dir.display(), "project loaded");
        Ok(Self {
            project_root,
            config,
            store,
        })
    }

    /// Load the catalog from disk. Called once per step, so every step sees
    /// the records as the previous step left them.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        self.store
            .load(&self.config.lint.licenses_files)
            .context("failed to load catalog")
    }

    /// Resolve a path from configuration against the project root.
    pub fn project_path(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }
}
