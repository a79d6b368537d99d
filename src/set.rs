//! Runs every input line through the pipeline.

use crate::classify::classify;
use crate::error::AttributeError;
use crate::line::parse_line;
use crate::model::AttributeSet;
use crate::registry::ModelRegistry;
use heck::ToTitleCase;

/// Build the attribute set for `lines`, in input order.
///
/// Records are keyed by name; a later line with the same name replaces the
/// earlier record. `title` names what the attributes are for and only shows
/// up in the [`AttributeError::EmptyAttributeSet`] message.
pub fn build_set<I, S>(
    title: &str,
    lines: I,
    registry: &dyn ModelRegistry,
) -> Result<AttributeSet, AttributeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = AttributeSet::default();
    for line in lines {
        if let Some(record) = classify(parse_line(line.as_ref())?, registry)? {
            set.insert(record);
        }
    }

    if set.is_empty() {
        return Err(AttributeError::EmptyAttributeSet {
            title: title.to_title_case(),
        });
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionValue, RelationshipKind};
    use crate::registry::{EmptyRegistry, ModelInfo, StaticRegistry};

    #[test]
    fn end_to_end_example() {
        let lines = [
            "id",
            "title -> string (255), nullable, unique, default:something",
            "published -> boolean, hidden, primary",
            "place -> relationship (belongs-to), eager",
        ];
        let set = build_set("model", lines, &EmptyRegistry).unwrap();
        assert_eq!(set.keys().collect::<Vec<_>>(), ["id", "title", "published", "place"]);

        assert_eq!(set.get("id").unwrap().type_name, "bigincrements");

        let title = set.get("title").unwrap();
        assert_eq!(title.arguments, ["255"]);
        assert!(title.options.contains("nullable"));
        assert!(title.options.contains("unique"));
        assert_eq!(title.options.option("default"), Some(OptionValue::Value("something")));

        let place = set.get("place").unwrap();
        assert_eq!(place.type_name, "relationship");
        let rel = place.relationship.as_ref().unwrap();
        assert_eq!(rel.kind, RelationshipKind::BelongsOne);
        assert!(rel.model_options.contains("eager"));
    }

    #[test]
    fn last_line_wins() {
        let set = build_set(
            "model",
            ["title -> string", "body -> text", "Ti-tle -> text"],
            &EmptyRegistry,
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("title").unwrap().type_name, "text");
    }

    #[test]
    fn only_noise_is_an_empty_set() {
        let err = build_set("blog post", ["@@@", "", "nothing"], &EmptyRegistry).unwrap_err();
        assert_eq!(
            err,
            AttributeError::EmptyAttributeSet {
                title: "Blog Post".to_string()
            }
        );
    }

    #[test]
    fn malformed_line_aborts_the_batch() {
        let err = build_set("model", ["id", "title -> (255)"], &EmptyRegistry).unwrap_err();
        assert!(matches!(err, AttributeError::MalformedLine { .. }));
    }

    #[test]
    fn bad_relationship_aborts_the_batch() {
        let err = build_set(
            "model",
            ["id", "owner -> relationship (owns)", "title -> string"],
            &EmptyRegistry,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "attribute owner must have relationship type set (got \"owns\")"
        );
    }

    #[test]
    fn registry_feeds_relationships() {
        let registry = StaticRegistry::new(vec![ModelInfo::new("Place"), ModelInfo::new("Review")]);
        let set = build_set(
            "model",
            ["review -> relationship (has-one), through:Place", "user -> relationship (has-one)"],
            &registry,
        )
        .unwrap();

        let review = set.get("review").unwrap().relationship.as_ref().unwrap();
        assert_eq!(
            review.through.as_ref().and_then(|t| t.info.as_ref()).map(|i| i.name.as_str()),
            Some("Place")
        );
        assert_eq!(review.foreign_key.as_deref(), Some("id"));

        let user = set.get("user").unwrap().relationship.as_ref().unwrap();
        assert_eq!(user.local_key.as_deref(), Some("user_id"));
        assert_eq!(set.relationships().count(), 2);
    }
}
