//! Attribute-description parser for the rocket scaffolder.
//!
//! Developers describe model attributes one per line:
//!
//! ```text
//! id
//! title -> string (255), nullable, unique, default:something
//! place -> relationship (belongs-to), eager
//! tags -> relationship (belongs-to-many), pivot:title|amount
//! ```
//!
//! [`build_set`] turns those lines into an ordered [`AttributeSet`] that the
//! model, migration, controller and view generators all read from:
//!
//! 1. [`line`] splits a line into name, type, arguments and options
//! 2. [`classify`] normalizes the type ([`types`]) and builds the record
//! 3. [`relationship`] resolves relationship kind, option buckets and join
//!    keys, consulting a [`ModelRegistry`]
//! 4. [`set`] collects the records, last line wins per name
//!
//! The pipeline is pure: no I/O, no logging, and any error aborts the batch.

pub mod classify;
pub mod error;
pub mod line;
pub mod model;
pub mod naming;
pub mod pivot;
pub mod registry;
pub mod relationship;
pub mod render;
pub mod set;
pub mod types;

pub use error::AttributeError;
pub use model::{
    AttributeRecord, AttributeSet, OptionValue, Options, RelationshipKind, RelationshipOptions,
};
pub use registry::{
    DeclaredRelationship, EmptyRegistry, ModelInfo, ModelRef, ModelRegistry, StaticRegistry,
};
pub use set::build_set;
