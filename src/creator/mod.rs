//! Entity assembly pipeline.
//!
//! Orchestrates entity creation from a parsed model: validate inputs, load
//! prior snapshots, initialize one entity per class, assemble fields, resolve
//! relationships, then apply the User-entity suppression rule. The whole run
//! is all-or-nothing; any failure aborts before output is produced.

pub mod changelog;
pub mod fields;
pub mod options;
pub mod relationships;

use std::collections::HashMap;
use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::entity::Entity;
use crate::error::CreatorError;
use crate::model::{ParsedModel, StorageKind};
use crate::naming;
use crate::snapshot;

pub use changelog::ChangelogAllocator;
pub use options::{EntityOptions, GenerationOverrides};
pub use relationships::{AssociationView, NormalizedAssociations};

/// Builder for an [`EntityCreator`]. The parsed model and storage kind are
/// required; override collections and the snapshot directory are optional.
#[derive(Debug, Default)]
pub struct EntityCreatorBuilder {
    model: Option<ParsedModel>,
    storage: Option<StorageKind>,
    overrides: GenerationOverrides,
    snapshot_dir: Option<PathBuf>,
}

impl EntityCreatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: ParsedModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn storage(mut self, storage: StorageKind) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn overrides(mut self, overrides: GenerationOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> Result<EntityCreator, CreatorError> {
        let model = self
            .model
            .ok_or(CreatorError::MissingInput { what: "parsed model" })?;
        let storage = self
            .storage
            .ok_or(CreatorError::MissingInput { what: "storage kind" })?;
        Ok(EntityCreator {
            model,
            storage,
            overrides: self.overrides,
            snapshot_dir: self.snapshot_dir,
        })
    }
}

/// Result of a creation run: the entity map keyed by class id, plus the
/// normalized association view (original + effective cardinalities).
#[derive(Debug, Clone)]
pub struct Creation {
    pub entities: IndexMap<String, Entity>,
    pub associations: NormalizedAssociations,
}

impl Creation {
    /// Entities re-keyed by class name, the identity used for snapshot files.
    pub fn entities_by_name<'a>(
        &'a self,
        model: &'a ParsedModel,
    ) -> impl Iterator<Item = (&'a str, &'a Entity)> {
        self.entities.iter().filter_map(|(id, entity)| {
            model.class(id).map(|class| (class.name.as_str(), entity))
        })
    }
}

/// The entity creation engine. All run state is held here and rebuilt per
/// invocation; there is no shared module state between runs.
#[derive(Debug)]
pub struct EntityCreator {
    model: ParsedModel,
    storage: StorageKind,
    overrides: GenerationOverrides,
    snapshot_dir: Option<PathBuf>,
}

impl EntityCreator {
    pub fn builder() -> EntityCreatorBuilder {
        EntityCreatorBuilder::new()
    }

    pub fn model(&self) -> &ParsedModel {
        &self.model
    }

    /// Run the full pipeline.
    pub fn create(&self) -> Result<Creation, CreatorError> {
        self.create_with_allocator(ChangelogAllocator::new())
    }

    fn create_with_allocator(
        &self,
        allocator: ChangelogAllocator,
    ) -> Result<Creation, CreatorError> {
        if !self.storage.is_relational() && self.model.has_associations() {
            return Err(CreatorError::UnsupportedModeling {
                storage: self.storage.to_string(),
            });
        }

        let snapshots = match &self.snapshot_dir {
            Some(dir) => snapshot::load_snapshots(dir)?,
            None => HashMap::new(),
        };

        let mut entities = self.initialize_entities(&allocator, &snapshots);

        let mut normalized = NormalizedAssociations::from_model(&self.model);
        for (class_id, class) in &self.model.classes {
            debug!(class = %class.name, "resolving entity");
            if let Some(entity) = entities.get_mut(class_id) {
                fields::assemble_fields(class, &self.model, entity);
            }
            relationships::resolve_for_class(
                class_id,
                &self.model,
                &mut normalized,
                &mut entities,
            )?;
        }

        // Suppressed entities are removed only after every entity has been
        // fully resolved, so relationships pointing into them survive on the
        // other side.
        for (class_id, class) in &self.model.classes {
            if class.name.eq_ignore_ascii_case("user")
                && entities.shift_remove(class_id).is_some()
            {
                warn!(
                    class = %class.name,
                    "suppressing reserved User entity from output"
                );
            }
        }

        Ok(Creation {
            entities,
            associations: normalized,
        })
    }

    fn initialize_entities(
        &self,
        allocator: &ChangelogAllocator,
        snapshots: &HashMap<String, snapshot::EntitySnapshot>,
    ) -> IndexMap<String, Entity> {
        let mut entities = IndexMap::with_capacity(self.model.classes.len());
        for (ordinal, (class_id, class)) in self.model.classes.iter().enumerate() {
            let prior = snapshots
                .get(&class.name)
                .map(|s| s.changelog_date.as_str());
            let opts = options::resolve_options(class, &self.overrides);
            let table = if class.table_name.is_empty() {
                &class.name
            } else {
                &class.table_name
            };
            entities.insert(
                class_id.clone(),
                Entity {
                    fields: vec![],
                    relationships: vec![],
                    changelog_date: allocator.allocate(ordinal, prior),
                    javadoc: naming::format_comment(class.comment.as_deref()),
                    entity_table_name: naming::to_table_name(table),
                    dto: opts.dto,
                    pagination: opts.pagination,
                    service: opts.service,
                    microservice_name: opts.microservice_name,
                    search_engine: opts.search_engine,
                },
            );
        }
        entities
    }
}
