//! Join tables for belongs-many relationships.
//!
//! A pivot table is described with the same attribute lines a user would
//! type, then built like any other attribute set.

use crate::error::AttributeError;
use crate::model::AttributeSet;
use crate::naming;
use crate::registry::ModelRegistry;
use crate::set::build_set;
use indexmap::IndexSet;

/// Pivot table name: both model basenames sorted, then lowercased and
/// joined by `_`.
pub fn pivot_table_name(registry: &dyn ModelRegistry, first: &str, second: &str) -> String {
    let mut names = [first, second]
        .map(|model| naming::class_basename(&registry.class_name_for(model)).to_string());
    names.sort();
    names.join("_").to_lowercase()
}

/// Pivot columns the existing models already declare on their relationship
/// to each other, unique, in declaration order.
pub fn declared_pivot_columns(
    registry: &dyn ModelRegistry,
    first: &str,
    second: &str,
) -> Vec<String> {
    let classes = [first, second].map(|model| registry.class_name_for(model));
    if classes[0].eq_ignore_ascii_case(&classes[1]) {
        return Vec::new();
    }

    let mut columns = IndexSet::new();
    for (current, other) in [(first, &classes[1]), (second, &classes[0])] {
        let Some(info) = registry.lookup(current).filter(|info| info.exists()) else {
            continue;
        };
        for relationship in &info.relationships {
            if registry.class_name_for(&relationship.related).eq_ignore_ascii_case(other) {
                columns.extend(relationship.pivot.iter().cloned());
            }
        }
    }
    columns.into_iter().collect()
}

/// Attribute lines for a pivot table: key, timestamps, extra columns as
/// strings, and a cascading belongs-to for each side. Without explicit
/// columns the ones declared in the registry are used.
pub fn pivot_lines(
    registry: &dyn ModelRegistry,
    first: &str,
    second: &str,
    columns: &[String],
) -> Vec<String> {
    let columns = if columns.is_empty() {
        declared_pivot_columns(registry, first, second)
    } else {
        columns.to_vec()
    };

    let mut lines = vec!["id".to_string(), "timestamps".to_string()];
    lines.extend(
        columns
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(|c| format!("{} -> string", c)),
    );
    for model in [first, second] {
        let class = registry.class_name_for(model);
        lines.push(format!(
            "{} -> relationship (belongs-to-one), model:{}, delete:cascade",
            naming::class_basename(&class).to_lowercase(),
            class
        ));
    }
    lines
}

/// Table name and attribute set of the pivot between two models.
pub fn build_pivot(
    registry: &dyn ModelRegistry,
    first: &str,
    second: &str,
    columns: &[String],
) -> Result<(String, AttributeSet), AttributeError> {
    let table = pivot_table_name(registry, first, second);
    let set = build_set(&table, pivot_lines(registry, first, second, columns), registry)?;
    Ok((table, set))
}
