//! Turns a tokenized line into a record.

use crate::error::AttributeError;
use crate::line::ParsedLine;
use crate::model::{AttributeRecord, Options};
use crate::registry::ModelRegistry;
use crate::relationship;
use crate::types::{self, RELATIONSHIP};

/// Build the record for one tokenized line. Skipped lines yield `None`.
pub fn classify(
    parsed: ParsedLine,
    registry: &dyn ModelRegistry,
) -> Result<Option<AttributeRecord>, AttributeError> {
    let typed = match parsed {
        ParsedLine::Typed(typed) => typed,
        ParsedLine::Implicit { name, type_name } => {
            return Ok(Some(AttributeRecord::bare(name, type_name)))
        }
        ParsedLine::Skipped => return Ok(None),
    };

    let record = AttributeRecord {
        type_name: types::normalize_type(&typed.type_token),
        arguments: typed.arguments,
        options: Options::new(typed.options),
        relationship: None,
        name: typed.key,
    };

    if record.type_name == RELATIONSHIP {
        let name = record.name.clone();
        return relationship::resolve_relationship(&name, record, registry).map(Some);
    }
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::parse_line;
    use crate::model::RelationshipKind;
    use crate::registry::EmptyRegistry;

    fn classify_line(line: &str) -> Result<Option<AttributeRecord>, AttributeError> {
        classify(parse_line(line)?, &EmptyRegistry)
    }

    #[test]
    fn normalizes_type_alias() {
        let record = classify_line("count -> i, unsigned").unwrap().unwrap();
        assert_eq!(record.type_name, "integer");
        assert!(record.options.contains("unsigned"));
        assert!(!record.is_relationship());
    }

    #[test]
    fn relationship_alias_is_resolved() {
        let record = classify_line("user -> r (ho)").unwrap().unwrap();
        assert_eq!(record.type_name, "relationship");
        let rel = record.relationship.unwrap();
        assert_eq!(rel.kind, RelationshipKind::HasOne);
        assert_eq!(rel.local_key.as_deref(), Some("user_id"));
    }

    #[test]
    fn implicit_column_is_bare() {
        let record = classify_line("timestamps").unwrap().unwrap();
        assert_eq!(record, AttributeRecord::bare("timestamps", "timestamps"));
    }

    #[test]
    fn skipped_line_yields_nothing() {
        assert_eq!(classify_line("whatever").unwrap(), None);
    }

    #[test]
    fn relationship_errors_propagate() {
        assert!(matches!(
            classify_line("user -> relationship (upside-down)"),
            Err(AttributeError::UnrecognizedRelationshipKind { .. })
        ));
    }
}
