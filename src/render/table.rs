//! Table renderer — the confirmation preview shown before generating files.
//!
//! Relationship rows show the kind under "arguments" and the model-facing
//! options under "options".

use crate::model::{AttributeRecord, AttributeSet};
use crate::render::Renderer;
use anyhow::Result;
use comfy_table::presets::ASCII_FULL;
use comfy_table::Table;

pub struct TableRenderer;

impl Renderer for TableRenderer {
    fn render(&self, set: &AttributeSet) -> Result<String> {
        let mut table = Table::new();
        table
            .load_preset(ASCII_FULL)
            .set_header(vec!["name", "type", "arguments", "options"]);
        for record in set.values() {
            table.add_row(row(record));
        }
        Ok(format!("{}\n", table))
    }
}

fn row(record: &AttributeRecord) -> Vec<String> {
    let (arguments, options) = match &record.relationship {
        Some(rel) => (rel.kind.to_string(), rel.model_options.as_slice().join(", ")),
        None => (record.arguments.join(", "), record.options.as_slice().join(", ")),
    };
    vec![record.name.clone(), record.type_name.clone(), arguments, options]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EmptyRegistry;
    use crate::set::build_set;

    #[test]
    fn preview_rows() {
        let set = build_set(
            "model",
            [
                "title -> string (255), nullable, unique",
                "place -> relationship (belongs-to), eager, nullable",
            ],
            &EmptyRegistry,
        )
        .unwrap();

        assert_eq!(
            row(set.get("title").unwrap()),
            ["title", "string", "255", "nullable, unique"]
        );
        assert_eq!(
            row(set.get("place").unwrap()),
            ["place", "relationship", "belongs-one", "eager"]
        );

        let out = TableRenderer.render(&set).unwrap();
        assert!(out.contains("| name"));
        assert!(out.contains("belongs-one"));
        assert!(out.contains("nullable, unique"));
    }
}
