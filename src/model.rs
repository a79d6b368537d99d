//! The attribute set data model every generator receives.

use crate::registry::ModelRef;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Normalized relationship kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    HasOne,
    HasMany,
    BelongsOne,
    BelongsMany,
}

/// Accepted spellings for each relationship kind.
const KIND_ALIASES: &[(&str, RelationshipKind)] = &[
    ("has-one", RelationshipKind::HasOne),
    ("ho", RelationshipKind::HasOne),
    ("hasone", RelationshipKind::HasOne),
    ("one", RelationshipKind::HasOne),
    ("has-many", RelationshipKind::HasMany),
    ("hm", RelationshipKind::HasMany),
    ("hasmany", RelationshipKind::HasMany),
    ("many", RelationshipKind::HasMany),
    ("belongs-to-one", RelationshipKind::BelongsOne),
    ("bo", RelationshipKind::BelongsOne),
    ("belongstoone", RelationshipKind::BelongsOne),
    ("belongs-to", RelationshipKind::BelongsOne),
    ("belongs-one", RelationshipKind::BelongsOne),
    ("belongsto", RelationshipKind::BelongsOne),
    ("belongs", RelationshipKind::BelongsOne),
    ("one-many", RelationshipKind::BelongsOne),
    ("belongs-to-many", RelationshipKind::BelongsMany),
    ("bm", RelationshipKind::BelongsMany),
    ("belongstomany", RelationshipKind::BelongsMany),
    ("belongs-many", RelationshipKind::BelongsMany),
];

impl RelationshipKind {
    /// Resolve a user-typed kind token (case-insensitive).
    pub fn from_alias(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        KIND_ALIASES
            .iter()
            .find(|(alias, _)| *alias == token)
            .map(|(_, kind)| *kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HasOne => "has-one",
            Self::HasMany => "has-many",
            Self::BelongsOne => "belongs-one",
            Self::BelongsMany => "belongs-many",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`Options::option`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue<'a> {
    /// The bare flag is present (`nullable`).
    Flag,
    /// A `key:value` token is present; holds the value.
    Value(&'a str),
}

/// Ordered option tokens: bare flags and `key:value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Options(Vec<String>);

impl Options {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// Exact membership test.
    pub fn contains(&self, flag: &str) -> bool {
        self.0.iter().any(|t| t == flag)
    }

    /// Look up `key` either as a bare flag or as the first `key:value` token.
    pub fn option(&self, key: &str) -> Option<OptionValue<'_>> {
        self.0.iter().find_map(|token| {
            if token == key {
                return Some(OptionValue::Flag);
            }
            token
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix(':'))
                .map(OptionValue::Value)
        })
    }

    /// Value of the first `key:value` token, ignoring bare flags.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.0.iter().find_map(|token| {
            token
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix(':'))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for Options {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One described attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRecord {
    /// Lowercased name with hyphens removed; the key in [`AttributeSet`].
    pub name: String,
    /// Canonical type (see [`crate::types::normalize_type`]).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Positional type arguments (`string(255)` → `["255"]`).
    pub arguments: Vec<String>,
    pub options: Options,
    /// Set only when `type_name` is `relationship`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<RelationshipOptions>,
}

impl AttributeRecord {
    /// Record without arguments or options (auto-columns like `id`).
    pub fn bare(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            arguments: Vec::new(),
            options: Options::default(),
            relationship: None,
        }
    }

    pub fn is_relationship(&self) -> bool {
        self.relationship.is_some()
    }
}

/// Resolved relationship details attached to a relationship attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipOptions {
    pub kind: RelationshipKind,
    /// Options for the model file (`eager`, `hidden`, `morph:…`, `as:…`).
    pub model_options: Options,
    /// Options for the schema file (`nullable`, `delete:cascade`, …).
    pub mutation_options: Options,
    /// Intermediate model of a has-one/has-many-through relationship.
    pub through: Option<ModelRef>,
    /// Extra join-table columns (`pivot:title|amount`).
    pub pivot: Option<Vec<String>>,
    /// Explicit related model (`model:Place`).
    pub target: Option<ModelRef>,
    pub foreign_key: Option<String>,
    pub local_key: Option<String>,
    pub join_table: Option<String>,
    /// Options no bucket claimed, forwarded as construction arguments.
    pub remaining_arguments: Vec<String>,
}

/// Ordered, read-only mapping of attribute name → record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet(IndexMap<String, AttributeRecord>);

impl AttributeSet {
    /// Insert keyed by the record's name. A later record with the same name
    /// replaces the earlier one but keeps its original position.
    pub(crate) fn insert(&mut self, record: AttributeRecord) {
        self.0.insert(record.name.clone(), record);
    }

    pub fn get(&self, name: &str) -> Option<&AttributeRecord> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &AttributeRecord> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Relationship attributes only, in input order.
    pub fn relationships(&self) -> impl Iterator<Item = (&AttributeRecord, &RelationshipOptions)> {
        self.0
            .values()
            .filter_map(|r| r.relationship.as_ref().map(|rel| (r, rel)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(tokens: &[&str]) -> Options {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn kind_aliases_cover_every_spelling() {
        for alias in ["ho", "hasone", "one", "has-one"] {
            assert_eq!(RelationshipKind::from_alias(alias), Some(RelationshipKind::HasOne));
        }
        for alias in ["hm", "hasmany", "many", "has-many"] {
            assert_eq!(RelationshipKind::from_alias(alias), Some(RelationshipKind::HasMany));
        }
        for alias in [
            "bo", "belongstoone", "belongs-to", "belongs-one", "belongsto", "belongs",
            "one-many", "belongs-to-one",
        ] {
            assert_eq!(RelationshipKind::from_alias(alias), Some(RelationshipKind::BelongsOne));
        }
        for alias in ["bm", "belongstomany", "belongs-many", "belongs-to-many"] {
            assert_eq!(RelationshipKind::from_alias(alias), Some(RelationshipKind::BelongsMany));
        }
    }

    #[test]
    fn unknown_kind_is_none() {
        assert_eq!(RelationshipKind::from_alias("sideways"), None);
        assert_eq!(RelationshipKind::from_alias(""), None);
    }

    #[test]
    fn option_flag_and_value() {
        let o = opts(&["nullable", "default:something", "default:other"]);
        assert_eq!(o.option("nullable"), Some(OptionValue::Flag));
        assert_eq!(o.option("default"), Some(OptionValue::Value("something")));
        assert_eq!(o.value("default"), Some("something"));
        assert_eq!(o.value("nullable"), None);
        assert_eq!(o.option("unique"), None);
    }

    #[test]
    fn option_key_must_match_whole_prefix() {
        let o = opts(&["defaults:x"]);
        assert_eq!(o.option("default"), None);
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut set = AttributeSet::default();
        set.insert(AttributeRecord::bare("title", "string"));
        set.insert(AttributeRecord::bare("body", "text"));
        set.insert(AttributeRecord::bare("title", "text"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.keys().collect::<Vec<_>>(), ["title", "body"]);
        assert_eq!(set.get("title").map(|r| r.type_name.as_str()), Some("text"));
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&RelationshipKind::BelongsMany).unwrap();
        assert_eq!(json, "\"belongs-many\"");
    }
}
