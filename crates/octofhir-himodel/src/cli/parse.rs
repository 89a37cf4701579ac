//! Parse command implementation

use super::literal::LiteralKind;
use super::output;
use anyhow::{Context, Result};

/// Configuration for parse command
pub struct ParseConfig {
    pub kind: LiteralKind,
    pub literal: String,
}

/// Parse a literal and print its canonical rendering
pub fn parse(config: ParseConfig) -> Result<()> {
    println!("{}", render(&config)?);
    Ok(())
}

/// The lines printed by [`parse`]
pub fn render(config: &ParseConfig) -> Result<String> {
    let parsed = config
        .kind
        .parse(&config.literal)
        .with_context(|| format!("Failed to parse '{}'", config.literal))?;

    let mut lines = vec![output::format_field("value", &parsed.value)];
    if let Some(precision) = parsed.precision {
        lines.push(output::format_field("precision", precision));
    }
    Ok(lines.join("\n"))
}
