//! Relationship resolution.
//!
//! A relationship attribute looks like
//! `place -> relationship (belongs-to), model:Place, eager, delete:cascade`.
//! The first argument is the kind; the options are sorted into buckets for
//! the model file, the schema file, and both; join keys and table are then
//! filled in from the model registry or by naming convention.

use crate::error::AttributeError;
use crate::model::{AttributeRecord, Options, RelationshipKind, RelationshipOptions};
use crate::naming;
use crate::registry::{ModelInfo, ModelRef, ModelRegistry};

/// Which generator an option token is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Model file: visibility, eager loading, morph/alias directives.
    Model,
    /// Schema file: column modifiers and foreign key behaviour.
    Mutation,
    /// Both: related/through models, pivot columns, key and table names.
    Shared,
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Exact(&'static str),
    /// `prefix` followed by a non-empty value.
    Prefix(&'static str),
}

impl Pattern {
    fn matches(&self, token: &str) -> bool {
        match self {
            Pattern::Exact(flag) => token == *flag,
            Pattern::Prefix(prefix) => token
                .strip_prefix(prefix)
                .is_some_and(|value| !value.is_empty()),
        }
    }
}

/// Option pattern → bucket, first match wins.
const OPTION_BUCKETS: &[(Pattern, Bucket)] = &[
    (Pattern::Exact("eager"), Bucket::Model),
    (Pattern::Exact("hidden"), Bucket::Model),
    (Pattern::Exact("fillable"), Bucket::Model),
    (Pattern::Exact("format"), Bucket::Model),
    (Pattern::Exact("timestamps"), Bucket::Model),
    (Pattern::Prefix("morph:"), Bucket::Model),
    (Pattern::Prefix("as:"), Bucket::Model),
    (Pattern::Exact("autoIncrement"), Bucket::Mutation),
    (Pattern::Exact("first"), Bucket::Mutation),
    (Pattern::Exact("nullable"), Bucket::Mutation),
    (Pattern::Exact("unsigned"), Bucket::Mutation),
    (Pattern::Exact("useCurrent"), Bucket::Mutation),
    (Pattern::Exact("unique"), Bucket::Mutation),
    (Pattern::Exact("primary"), Bucket::Mutation),
    (Pattern::Exact("index"), Bucket::Mutation),
    (Pattern::Prefix("after:"), Bucket::Mutation),
    (Pattern::Prefix("charset:"), Bucket::Mutation),
    (Pattern::Prefix("collation:"), Bucket::Mutation),
    (Pattern::Prefix("comment:"), Bucket::Mutation),
    (Pattern::Prefix("delete:"), Bucket::Mutation),
    (Pattern::Prefix("default:"), Bucket::Mutation),
    (Pattern::Prefix("update:"), Bucket::Mutation),
    (Pattern::Prefix("through:"), Bucket::Shared),
    // legacy spelling accepted by older attribute files
    (Pattern::Prefix("trough:"), Bucket::Shared),
    (Pattern::Prefix("pivot:"), Bucket::Shared),
    (Pattern::Prefix("model:"), Bucket::Shared),
    (Pattern::Prefix("local:"), Bucket::Shared),
    (Pattern::Prefix("foreign:"), Bucket::Shared),
    (Pattern::Prefix("table:"), Bucket::Shared),
];

/// Bucket an option token belongs to, or `None` if no rule claims it.
pub fn bucket_for(token: &str) -> Option<Bucket> {
    OPTION_BUCKETS
        .iter()
        .find(|(pattern, _)| pattern.matches(token))
        .map(|(_, bucket)| *bucket)
}

/// Resolve the relationship details of `record`, which must come from a
/// line typed `relationship`.
///
/// The kind is taken off the front of the arguments. Unless the kind is
/// belongs-many (whose keys belong to the join table), foreign key, local
/// key and table are always filled in.
pub fn resolve_relationship(
    name: &str,
    mut record: AttributeRecord,
    registry: &dyn ModelRegistry,
) -> Result<AttributeRecord, AttributeError> {
    let kind_token = (!record.arguments.is_empty()).then(|| record.arguments.remove(0));
    let kind = kind_token
        .as_deref()
        .and_then(RelationshipKind::from_alias)
        .ok_or_else(|| AttributeError::UnrecognizedRelationshipKind {
            attribute: name.to_string(),
            kind: kind_token.clone(),
        })?;

    let mut model = Vec::new();
    let mut mutation = Vec::new();
    let mut shared = Vec::new();
    let mut remaining = Vec::new();
    for token in record.options.iter() {
        let target = match bucket_for(token) {
            Some(Bucket::Model) => &mut model,
            Some(Bucket::Mutation) => &mut mutation,
            Some(Bucket::Shared) => &mut shared,
            None => &mut remaining,
        };
        target.push(token.to_string());
    }
    let shared = Options::new(shared);

    let mut resolved = RelationshipOptions {
        kind,
        model_options: Options::new(model),
        mutation_options: Options::new(mutation),
        through: shared
            .value("through")
            .or_else(|| shared.value("trough"))
            .map(|m| ModelRef::resolve(registry, m)),
        pivot: shared.value("pivot").map(pivot_columns),
        target: shared.value("model").map(|m| ModelRef::resolve(registry, m)),
        foreign_key: shared.value("foreign").map(str::to_string),
        local_key: shared.value("local").map(str::to_string),
        join_table: shared.value("table").map(str::to_string),
        remaining_arguments: remaining,
    };

    if kind != RelationshipKind::BelongsMany {
        infer_keys(name, &mut resolved, registry);
    }

    record.relationship = Some(resolved);
    Ok(record)
}

/// Fill unset keys from the related model, or from the attribute name when
/// the registry does not know the model.
fn infer_keys(name: &str, rel: &mut RelationshipOptions, registry: &dyn ModelRegistry) {
    let related = rel
        .target
        .as_ref()
        .and_then(|t| t.info.clone())
        .filter(ModelInfo::exists)
        .or_else(|| registry.lookup(name).filter(ModelInfo::exists));

    match related {
        Some(info) => {
            let local = format!(
                "{}_{}",
                naming::snake(&naming::singular(&info.name)),
                info.primary_key_name
            );
            rel.foreign_key.get_or_insert(info.primary_key_name);
            rel.join_table.get_or_insert(info.table_name);
            rel.local_key.get_or_insert(local);
        }
        None => {
            let singular = naming::snake(&naming::singular(name));
            rel.local_key
                .get_or_insert_with(|| format!("{}_id", singular));
            rel.foreign_key.get_or_insert_with(|| "id".to_string());
            rel.join_table
                .get_or_insert_with(|| naming::plural(&singular));
        }
    }
}

fn pivot_columns(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
