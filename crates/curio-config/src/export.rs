//! Markdown export options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_output() -> PathBuf {
    PathBuf::from("README.md")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Output file, relative to the project root.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Markdown prepended to the rendered list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<PathBuf>,

    /// Markdown appended to the rendered list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            header: None,
            footer: None,
        }
    }
}
