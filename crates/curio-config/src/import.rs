//! Markdown import options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_source_file() -> PathBuf {
    PathBuf::from("README.md")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Awesome-style markdown list to import, relative to the project root.
    #[serde(default = "default_source_file")]
    pub source_file: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source_file: default_source_file(),
        }
    }
}
