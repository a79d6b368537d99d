//! Renderer module — trait-based format dispatch for a finished attribute set.

pub mod json;
pub mod table;

use crate::model::AttributeSet;
use anyhow::{anyhow, Result};

/// Trait for rendering an attribute set into a specific output format.
pub trait Renderer {
    fn render(&self, set: &AttributeSet) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "table" => Ok(Box::new(table::TableRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use table or json", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert!(create_renderer("table").is_ok());
        assert!(create_renderer("json").is_ok());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = create_renderer("yaml").err().unwrap();
        assert!(err.to_string().contains("unknown format: yaml"));
    }
}
