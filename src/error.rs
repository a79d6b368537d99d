//! Errors raised while turning attribute lines into an attribute set.

use thiserror::Error;

/// Fatal conditions for a single batch of attribute lines.
///
/// Every variant aborts the batch; no partial attribute set is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The `type(args), options` expression after `->` is not parseable.
    #[error("input cannot be parsed: \"{line}\"")]
    MalformedLine { line: String },

    /// A relationship attribute whose first argument is not a known kind.
    /// `kind` is `None` when the relationship had no arguments at all.
    #[error("attribute {attribute} must have relationship type set{}", unknown_kind(.kind))]
    UnrecognizedRelationshipKind {
        attribute: String,
        kind: Option<String>,
    },

    /// No line of the batch produced an attribute.
    #[error("{title} attributes input missing.")]
    EmptyAttributeSet { title: String },
}

fn unknown_kind(kind: &Option<String>) -> String {
    match kind {
        Some(kind) => format!(" (got \"{}\")", kind),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_message_names_attribute() {
        let err = AttributeError::UnrecognizedRelationshipKind {
            attribute: "place".to_string(),
            kind: Some("sideways".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "attribute place must have relationship type set (got \"sideways\")"
        );
    }

    #[test]
    fn relationship_message_without_kind() {
        let err = AttributeError::UnrecognizedRelationshipKind {
            attribute: "place".to_string(),
            kind: None,
        };
        assert_eq!(err.to_string(), "attribute place must have relationship type set");
    }

    #[test]
    fn empty_set_message_carries_title() {
        let err = AttributeError::EmptyAttributeSet {
            title: "Migration".to_string(),
        };
        assert_eq!(err.to_string(), "Migration attributes input missing.");
    }
}
