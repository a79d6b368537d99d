//! Read-only metadata about models that already exist.
//!
//! Relationship resolution asks the registry for a model's class name,
//! primary key and table. The CLI loads a [`StaticRegistry`] from a JSON
//! file; without one every lookup misses and names fall back to convention.

use crate::naming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Metadata about one registered model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// Short model name (`Place`).
    pub name: String,
    /// Fully-qualified class name (`App\Models\Place`).
    pub class_name: String,
    pub primary_key_name: String,
    pub table_name: String,
    /// Relationships the model class already declares.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<DeclaredRelationship>,
    exists: bool,
}

/// A relationship declared on an existing model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclaredRelationship {
    /// Related model, by class or short name.
    pub related: String,
    /// Extra columns on the join table.
    #[serde(default)]
    pub pivot: Vec<String>,
}

impl ModelInfo {
    /// Model with conventional class, key and table names.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            class_name: naming::model_class(&name),
            table_name: naming::table_name(&name),
            primary_key_name: "id".to_string(),
            relationships: Vec::new(),
            exists: true,
            name,
        }
    }

    pub fn with_primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key_name = key.into();
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table_name = table.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class_name = class.into();
        self
    }

    pub fn with_relationship<I, S>(mut self, related: impl Into<String>, pivot: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationships.push(DeclaredRelationship {
            related: related.into(),
            pivot: pivot.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_exists(mut self, exists: bool) -> Self {
        self.exists = exists;
        self
    }

    /// Whether the model is backed by an actual class.
    pub fn exists(&self) -> bool {
        self.exists
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.trim().trim_start_matches('\\');
        if query.is_empty() {
            return false;
        }
        let basename = naming::class_basename(query);
        self.class_name.eq_ignore_ascii_case(query)
            || self.name.eq_ignore_ascii_case(basename)
            || self
                .name
                .eq_ignore_ascii_case(&naming::studly(&naming::singular(basename)))
    }
}

/// A model named in an attribute option, resolved against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRef {
    pub class_name: String,
    /// Registry entry, when the model is known.
    pub info: Option<ModelInfo>,
}

impl ModelRef {
    pub fn resolve(registry: &dyn ModelRegistry, name: &str) -> Self {
        Self {
            class_name: registry.class_name_for(name),
            info: registry.lookup(name),
        }
    }
}

/// Read-only source of model metadata.
pub trait ModelRegistry {
    /// Canonical class name for a loosely spelled model name.
    fn class_name_for(&self, name: &str) -> String {
        match self.lookup(name) {
            Some(info) => info.class_name,
            None => naming::model_class(name),
        }
    }

    fn lookup(&self, name: &str) -> Option<ModelInfo>;
}

/// Registry that knows no models.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRegistry;

impl ModelRegistry for EmptyRegistry {
    fn lookup(&self, _name: &str) -> Option<ModelInfo> {
        None
    }
}

/// Failure to load a registry file.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read model registry {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model registry: {0}")]
    Json(#[from] serde_json::Error),
}

/// One entry of the registry file; missing fields follow convention.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelEntry {
    name: String,
    #[serde(default, alias = "class_name")]
    class: Option<String>,
    #[serde(default, alias = "primary_key")]
    primary: Option<String>,
    #[serde(default)]
    table: Option<String>,
    #[serde(default = "default_exists")]
    exists: bool,
    #[serde(default)]
    relationships: Vec<DeclaredRelationship>,
}

fn default_exists() -> bool {
    true
}

impl ModelEntry {
    fn into_info(self) -> ModelInfo {
        let mut info = ModelInfo::new(self.name).with_exists(self.exists);
        info.relationships = self.relationships;
        if let Some(class) = self.class {
            info = info.with_class(class);
        }
        if let Some(primary) = self.primary {
            info = info.with_primary_key(primary);
        }
        if let Some(table) = self.table {
            info = info.with_table(table);
        }
        info
    }
}

/// Registry file layout: a bare list, or `{ "models": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegistryFile {
    List(Vec<ModelEntry>),
    Wrapped { models: Vec<ModelEntry> },
}

/// In-memory registry, usually loaded from JSON.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    models: Vec<ModelInfo>,
}

impl StaticRegistry {
    pub fn new(models: Vec<ModelInfo>) -> Self {
        Self { models }
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries = match serde_json::from_str::<RegistryFile>(json)? {
            RegistryFile::List(entries) => entries,
            RegistryFile::Wrapped { models } => models,
        };
        Ok(Self::new(entries.into_iter().map(ModelEntry::into_info).collect()))
    }

    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let json = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelRegistry for StaticRegistry {
    fn lookup(&self, name: &str) -> Option<ModelInfo> {
        self.models.iter().find(|m| m.matches(name)).cloned()
    }
}
