use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("curio error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(flags.quiet, flags.verbose)?;

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args);
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let ctx = context::AppContext::init(project_root)
        .context("failed to initialize curio project")?;

    commands::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CURIO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&Path>) -> anyhow::Result<PathBuf> {
    let root = match project_override {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    if !root.is_dir() {
        anyhow::bail!("invalid --project '{}': directory does not exist", root.display());
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::resolve_project_root;

    #[test]
    fn explicit_project_must_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(resolve_project_root(Some(dir.path())).unwrap(), dir.path());

        let missing = dir.path().join("missing");
        let err = resolve_project_root(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn defaults_to_current_directory() {
        let root = resolve_project_root(None).unwrap();
        assert_eq!(root, std::env::current_dir().unwrap());
    }
}
