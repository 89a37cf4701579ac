//! Compare command implementation

use super::literal::LiteralKind;
use super::output;
use anyhow::{Context, Result};
use octofhir_himodel_types::ValueComparison;

/// Configuration for compare command
pub struct CompareConfig {
    pub kind: LiteralKind,
    pub left: String,
    pub right: String,
}

/// Outcome of comparing two literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub equal: bool,
    pub equivalent: bool,
}

/// Parse both literals with the same grammar and print both comparisons
pub fn compare(config: CompareConfig) -> Result<()> {
    let comparison = evaluate(&config)?;
    println!("{}", output::format_field("equal", output::format_bool(comparison.equal)));
    println!(
        "{}",
        output::format_field("equivalent", output::format_bool(comparison.equivalent))
    );
    Ok(())
}

pub fn evaluate(config: &CompareConfig) -> Result<Comparison> {
    let left = config
        .kind
        .parse(&config.left)
        .with_context(|| format!("Failed to parse left operand '{}'", config.left))?;
    let right = config
        .kind
        .parse(&config.right)
        .with_context(|| format!("Failed to parse right operand '{}'", config.right))?;

    Ok(Comparison {
        equal: left.value.equal(&right.value),
        equivalent: left.value.equivalent(&right.value),
    })
}
