//! Relationship resolution: the core graph-normalization step.
//!
//! Associations are directed and partially specified; entities must end up
//! with relationship records describing both of their association endpoints.
//! For a class `C`, the resolver scans the full association set and emits:
//!
//! - a from-side record on `C` for every association with `from == C`, and
//! - a to-side record on `C` for every association with `to == C` that also
//!   declares an injected field on the "to" side.
//!
//! An association with `to == C` but no injected "to" field is never derived
//! independently from `C`: a ONE_TO_MANY without an inverse descriptor gets
//! its inverse synthesized directly on the target entity while the "from"
//! class is being processed, and its effective cardinality becomes
//! MANY_TO_ONE. The rewrite is recorded in [`NormalizedAssociations`] instead
//! of mutating the input model, so the original association set stays intact
//! and resolution stays order-independent.

use indexmap::IndexMap;

use crate::entity::{Entity, RelationshipRecord};
use crate::error::CreatorError;
use crate::model::{
    AssociationModel, Cardinality, ClassModel, InjectedField, ParsedModel,
};
use crate::naming::entity_ref_name;

/// Per-association cardinality view: the cardinality as declared by the
/// source model, and the effective cardinality after inverse synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociationView {
    pub original: Cardinality,
    pub effective: Cardinality,
}

/// Normalized view over the association set, built during resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedAssociations {
    views: IndexMap<String, AssociationView>,
}

impl NormalizedAssociations {
    pub fn from_model(model: &ParsedModel) -> Self {
        let views = model
            .associations
            .iter()
            .map(|(id, assoc)| {
                (
                    id.clone(),
                    AssociationView {
                        original: assoc.association_type,
                        effective: assoc.association_type,
                    },
                )
            })
            .collect();
        NormalizedAssociations { views }
    }

    pub fn view(&self, association_id: &str) -> Option<&AssociationView> {
        self.views.get(association_id)
    }

    pub fn original(&self, association_id: &str) -> Option<Cardinality> {
        self.views.get(association_id).map(|v| v.original)
    }

    pub fn effective(&self, association_id: &str) -> Option<Cardinality> {
        self.views.get(association_id).map(|v| v.effective)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AssociationView)> {
        self.views.iter()
    }

    pub(crate) fn rewrite(&mut self, association_id: &str, effective: Cardinality) {
        if let Some(view) = self.views.get_mut(association_id) {
            view.effective = effective;
        }
    }
}

/// Resolve all relationship records for the class `class_id`, appending them
/// to the in-progress entity map. Cross-entity mutation happens only when a
/// ONE_TO_MANY without an inverse descriptor synthesizes a MANY_TO_ONE record
/// on its target entity.
pub fn resolve_for_class(
    class_id: &str,
    model: &ParsedModel,
    normalized: &mut NormalizedAssociations,
    entities: &mut IndexMap<String, Entity>,
) -> Result<(), CreatorError> {
    for (assoc_id, assoc) in &model.associations {
        let kind = normalized
            .effective(assoc_id)
            .unwrap_or(assoc.association_type);

        if assoc.from == class_id {
            let (from_class, to_class) = validate_association(model, assoc)?;
            emit_from_side(
                assoc_id, assoc, kind, from_class, to_class, normalized, entities,
            );
        }

        if assoc.to == class_id && assoc.injected_field_in_to.is_some() {
            emit_to_side(assoc, kind, model, entities);
        }
    }

    Ok(())
}

/// Structural validity check, run from-side only before any emission.
fn validate_association<'a>(
    model: &'a ParsedModel,
    assoc: &AssociationModel,
) -> Result<(&'a ClassModel, &'a ClassModel), CreatorError> {
    let from = model
        .class(&assoc.from)
        .ok_or_else(|| invalid(model, assoc, "unknown source class"))?;
    let to = model
        .class(&assoc.to)
        .ok_or_else(|| invalid(model, assoc, "unknown target class"))?;
    if assoc.from == assoc.to {
        return Err(invalid(model, assoc, "source and target are the same class"));
    }
    Ok((from, to))
}

fn invalid(model: &ParsedModel, assoc: &AssociationModel, reason: &str) -> CreatorError {
    let name = |id: &str| {
        model
            .class(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    };
    CreatorError::InvalidAssociation {
        from: name(&assoc.from),
        to: name(&assoc.to),
        reason: reason.to_string(),
    }
}

fn emit_from_side(
    assoc_id: &str,
    assoc: &AssociationModel,
    kind: Cardinality,
    from_class: &ClassModel,
    to_class: &ClassModel,
    normalized: &mut NormalizedAssociations,
    entities: &mut IndexMap<String, Entity>,
) {
    let from_field = InjectedField::parse(assoc.injected_field_in_from.as_deref());
    let to_field = InjectedField::parse(assoc.injected_field_in_to.as_deref());
    let other_name = entity_ref_name(&to_class.name);

    let record = match kind {
        Cardinality::OneToOne => {
            let other_rel = if to_field.is_named() {
                to_field.relationship_name.clone()
            } else {
                other_name.clone()
            };
            Some(
                RelationshipRecord::new(kind, from_field.relationship_name, other_name)
                    .with_other_entity_field(from_field.other_entity_field)
                    .with_owner_side(true)
                    .with_other_entity_relationship_name(other_rel),
            )
        }
        Cardinality::OneToMany => {
            let name = if from_field.is_named() {
                from_field.relationship_name
            } else {
                other_name.clone()
            };
            let mut record = RelationshipRecord::new(kind, name, other_name);
            if assoc.injected_field_in_to.is_none() {
                let source_ref = entity_ref_name(&from_class.name);
                record =
                    record.with_other_entity_relationship_name(source_ref.clone());
                // The model left the inverse side unspecified: attach it to
                // the target entity ourselves and record the association's
                // effective cardinality as MANY_TO_ONE.
                if let Some(target) = entities.get_mut(&assoc.to) {
                    target.push_relationship(
                        RelationshipRecord::new(
                            Cardinality::ManyToOne,
                            source_ref.clone(),
                            source_ref,
                        )
                        .with_other_entity_field(to_field.other_entity_field),
                    );
                }
                normalized.rewrite(assoc_id, Cardinality::ManyToOne);
            } else {
                record = record.with_other_entity_relationship_name(to_field.relationship_name);
            }
            Some(record)
        }
        Cardinality::ManyToOne => {
            // Without a "from" descriptor the association is invisible from
            // this side.
            assoc.injected_field_in_from.as_ref().map(|_| {
                RelationshipRecord::new(kind, from_field.relationship_name, other_name)
                    .with_other_entity_field(from_field.other_entity_field)
            })
        }
        Cardinality::ManyToMany => Some(
            RelationshipRecord::new(kind, from_field.relationship_name, other_name)
                .with_other_entity_field(from_field.other_entity_field)
                .with_owner_side(true),
        ),
    };

    if let Some(record) = record {
        if let Some(entity) = entities.get_mut(&assoc.from) {
            entity.push_relationship(record);
        }
    }
}

/// Emit the to-side record. Only called when `injectedFieldInTo` is present.
fn emit_to_side(
    assoc: &AssociationModel,
    kind: Cardinality,
    model: &ParsedModel,
    entities: &mut IndexMap<String, Entity>,
) {
    let from_field = InjectedField::parse(assoc.injected_field_in_from.as_deref());
    let to_field = InjectedField::parse(assoc.injected_field_in_to.as_deref());
    let source_name = model
        .class(&assoc.from)
        .map(|c| entity_ref_name(&c.name))
        .unwrap_or_else(|| assoc.from.clone());

    let record = match kind {
        Cardinality::OneToOne => RelationshipRecord::new(
            kind,
            to_field.relationship_name,
            source_name,
        )
        .with_owner_side(false)
        .with_other_entity_relationship_name(from_field.relationship_name),
        Cardinality::OneToMany => {
            // The "many" endpoint always holds the foreign key, so the
            // to-side reports itself as MANY_TO_ONE.
            let name = if to_field.is_named() {
                to_field.relationship_name
            } else {
                source_name.clone()
            };
            RelationshipRecord::new(Cardinality::ManyToOne, name, source_name)
                .with_other_entity_field(to_field.other_entity_field)
        }
        Cardinality::ManyToOne => {
            RelationshipRecord::new(kind, to_field.relationship_name, source_name)
                .with_other_entity_field(to_field.other_entity_field)
        }
        Cardinality::ManyToMany => RelationshipRecord::new(
            kind,
            to_field.relationship_name,
            source_name,
        )
        .with_owner_side(false)
        .with_other_entity_relationship_name(from_field.relationship_name),
    };

    if let Some(entity) = entities.get_mut(&assoc.to) {
        entity.push_relationship(record);
    }
}
