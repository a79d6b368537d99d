//! JSON renderer — the attribute set as generators consume it.

use crate::model::AttributeSet;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, set: &AttributeSet) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(set).context("failed to serialize attribute set")?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EmptyRegistry;
    use crate::set::build_set;
    use serde_json::Value;

    #[test]
    fn keeps_input_order_and_shape() {
        let set = build_set(
            "model",
            ["title -> string (120), nullable", "id", "owner -> relationship (bo), eager"],
            &EmptyRegistry,
        )
        .unwrap();
        let out = JsonRenderer.render(&set).unwrap();

        let keys: Vec<_> = out
            .lines()
            .filter(|l| l.starts_with("  \"") && l.ends_with('{'))
            .map(|l| l.trim())
            .collect();
        assert_eq!(keys, ["\"title\": {", "\"id\": {", "\"owner\": {"]);

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["title"]["type"], "string");
        assert_eq!(value["title"]["arguments"][0], "120");
        assert_eq!(value["title"]["options"][0], "nullable");
        assert!(value["id"].get("relationship").is_none());
        assert_eq!(value["owner"]["relationship"]["kind"], "belongs-one");
        assert_eq!(value["owner"]["relationship"]["model_options"][0], "eager");
        assert_eq!(value["owner"]["relationship"]["local_key"], "owner_id");
    }
}
