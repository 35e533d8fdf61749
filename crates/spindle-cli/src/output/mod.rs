use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a command result in the requested format; `text` is the
/// human-readable summary used by [`OutputFormat::Text`].
pub fn render<T: Serialize>(value: &T, format: OutputFormat, text: &str) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(text.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a command result in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat, text: &str) -> anyhow::Result<()> {
    let rendered = render(value, format, text)?;
    println!("{rendered}");
    Ok(())
}
