//! # Entigen: Model-to-Entity Conversion Engine
//!
//! Entigen converts an in-memory object model (classes, fields, enumerations
//! and directed associations extracted from a modeling tool) into a normalized
//! entity representation consumable by a downstream code generator: per-entity
//! field lists, relationship lists, validation rules, and generation metadata
//! such as pagination, DTO, service and search options.
//!
//! The core is the relationship resolution and entity assembly engine. Each
//! directed, partially specified association is turned into one or two
//! cardinality-correct, named relationship records attached to the entities
//! on both ends, including synthesizing the inverse side when the source
//! model only declares one direction.
//!
//! ## Example
//!
//! ```ignore
//! use entigen::{EntityCreator, StorageKind};
//!
//! let creation = EntityCreator::builder()
//!     .model(model)
//!     .storage(StorageKind::Sql)
//!     .snapshot_dir(".entigen")
//!     .build()?
//!     .create()?;
//!
//! for (class_id, entity) in &creation.entities {
//!     println!("{}: {} relationships", class_id, entity.relationships.len());
//! }
//! ```

// Core modules
pub mod entity;
pub mod error;
pub mod model;
pub mod naming;
pub mod snapshot;

// Entity assembly pipeline
pub mod creator;

// Re-export key types
pub use entity::{Entity, FieldRecord, RelationshipRecord};
pub use error::CreatorError;
pub use model::{
    AssociationModel, Cardinality, ClassModel, EnumModel, FieldModel, InjectedField,
    ParsedModel, StorageKind, TypeModel, ValidationModel,
};

// Re-export pipeline types
pub use creator::{
    AssociationView, ChangelogAllocator, Creation, EntityCreator, EntityCreatorBuilder,
    EntityOptions, GenerationOverrides, NormalizedAssociations,
};

// Re-export snapshot helpers
pub use snapshot::{load_snapshots, write_snapshots, EntitySnapshot};
