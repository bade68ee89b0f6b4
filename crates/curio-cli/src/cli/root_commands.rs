use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create records from an awesome-style markdown list.
    Import(ImportArgs),
    /// Check the catalog for consistency and policy violations.
    Lint,
    /// Fetch repository metadata and update software records.
    Enrich(EnrichArgs),
    /// Report dead links among record URLs.
    CheckUrls,
    /// Render the catalog to a single markdown page.
    Export(ExportArgs),
    /// Run the configured steps in order.
    Run,
    /// Print the JSON Schema of a record kind.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Default, Args)]
pub struct ImportArgs {
    /// Markdown file to import (overrides import.source_file).
    pub source: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Args)]
pub struct EnrichArgs {
    /// Skip items whose metadata is already complete.
    #[arg(long)]
    pub only_missing: bool,
}

#[derive(Clone, Debug, Default, Args)]
pub struct ExportArgs {
    /// Output file (overrides export.output).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record kind: software, tag, platform or license.
    pub kind: String,
}
