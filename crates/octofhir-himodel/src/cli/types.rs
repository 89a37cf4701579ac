//! Type registry commands: `common-base` and `types`

use anyhow::{Result, anyhow};
use octofhir_himodel_types::{TypeRegistry, TypeSpecId};

/// Print the nearest common base of two types, or `none`
pub fn common_base(registry: &TypeRegistry, left: &str, right: &str) -> Result<()> {
    println!("{}", common_base_name(registry, left, right)?);
    Ok(())
}

pub fn common_base_name(registry: &TypeRegistry, left: &str, right: &str) -> Result<String> {
    let left = resolve(registry, left)?;
    let right = resolve(registry, right)?;
    Ok(registry
        .common_base(left, right)
        .and_then(|base| registry.name_of(base))
        .map_or_else(|| "none".to_string(), ToString::to_string))
}

/// Print every registered type with its base chain
pub fn list(registry: &TypeRegistry) -> Result<()> {
    for line in chains(registry) {
        println!("{}", line);
    }
    Ok(())
}

/// One `name -> base -> ...` line per type, in registration order
pub fn chains(registry: &TypeRegistry) -> Vec<String> {
    registry
        .iter()
        .map(|spec| {
            registry
                .ancestors(spec.id())
                .filter_map(|id| registry.name_of(id).map(ToString::to_string))
                .collect::<Vec<_>>()
                .join(" -> ")
        })
        .collect()
}

fn resolve(registry: &TypeRegistry, name: &str) -> Result<TypeSpecId> {
    registry
        .resolve(name)
        .ok_or_else(|| anyhow!("Unknown type '{}'", name))
}
