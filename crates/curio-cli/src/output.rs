use serde::Serialize;

use crate::cli::OutputFormat;

/// Print a command result: `text` as given, `json` as pretty JSON.
pub fn output<T: Serialize>(value: &T, text: &str, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
