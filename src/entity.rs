//! Normalized entity output types.
//!
//! One [`Entity`] is produced per source class. The serialized shape matches
//! the per-entity JSON files the downstream code generator consumes: camelCase
//! members, optional members omitted rather than null, cardinalities in
//! kebab-case.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::Cardinality;

/// A resolved field on an entity.
///
/// `field_id` is a 1-based sequence id unique per entity, in declaration
/// order. `field_validate_rules` is absent (not an empty list) when the source
/// field carries no validations, so downstream can tell "no constraints" from
/// "empty constraint set". Rule parameters are flattened into the record keyed
/// `fieldValidateRules<CapitalizedRule>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    pub field_id: u32,
    pub field_name: String,
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_values: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type_blob_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_validate_rules: Option<Vec<String>>,
    #[serde(flatten)]
    pub field_validate_params: IndexMap<String, serde_json::Value>,
}

/// A resolved relationship endpoint attached to one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRecord {
    pub relationship_id: u32,
    pub relationship_type: Cardinality,
    pub relationship_name: String,
    pub other_entity_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_entity_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_side: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_entity_relationship_name: Option<String>,
}

impl RelationshipRecord {
    /// New record with the optional members unset. The sequence id is filled
    /// in when the record is appended to an entity.
    pub fn new(
        relationship_type: Cardinality,
        relationship_name: impl Into<String>,
        other_entity_name: impl Into<String>,
    ) -> Self {
        RelationshipRecord {
            relationship_id: 0,
            relationship_type,
            relationship_name: relationship_name.into(),
            other_entity_name: other_entity_name.into(),
            other_entity_field: None,
            owner_side: None,
            other_entity_relationship_name: None,
        }
    }

    pub fn with_other_entity_field(mut self, field: impl Into<String>) -> Self {
        self.other_entity_field = Some(field.into());
        self
    }

    pub fn with_owner_side(mut self, owner: bool) -> Self {
        self.owner_side = Some(owner);
        self
    }

    pub fn with_other_entity_relationship_name(mut self, name: impl Into<String>) -> Self {
        self.other_entity_relationship_name = Some(name.into());
        self
    }
}

/// A fully resolved entity, one per source class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
    pub changelog_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    pub entity_table_name: String,
    pub dto: String,
    pub pagination: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
}

impl Entity {
    /// Append a relationship record, assigning the next 1-based sequence id.
    /// Records are appended, never reordered.
    pub fn push_relationship(&mut self, mut record: RelationshipRecord) {
        record.relationship_id = self.relationships.len() as u32 + 1;
        self.relationships.push(record);
    }

    /// Append a field record, assigning the next 1-based sequence id.
    pub fn push_field(&mut self, mut record: FieldRecord) {
        record.field_id = self.fields.len() as u32 + 1;
        self.fields.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_entity() -> Entity {
        Entity {
            fields: vec![],
            relationships: vec![],
            changelog_date: "20260101000000".to_string(),
            javadoc: None,
            entity_table_name: "author".to_string(),
            dto: "no".to_string(),
            pagination: "no".to_string(),
            service: "no".to_string(),
            microservice_name: None,
            search_engine: None,
        }
    }

    #[test]
    fn test_push_relationship_assigns_sequence_ids() {
        let mut entity = empty_entity();
        entity.push_relationship(RelationshipRecord::new(
            Cardinality::OneToMany,
            "books",
            "book",
        ));
        entity.push_relationship(RelationshipRecord::new(
            Cardinality::ManyToOne,
            "publisher",
            "publisher",
        ));

        assert_eq!(entity.relationships[0].relationship_id, 1);
        assert_eq!(entity.relationships[1].relationship_id, 2);
    }

    #[test]
    fn test_entity_serializes_camel_case_without_absent_members() {
        let mut entity = empty_entity();
        entity.push_relationship(
            RelationshipRecord::new(Cardinality::OneToOne, "profile", "profile")
                .with_owner_side(true),
        );

        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains("\"changelogDate\":\"20260101000000\""));
        assert!(json.contains("\"entityTableName\":\"author\""));
        assert!(json.contains("\"relationshipType\":\"one-to-one\""));
        assert!(json.contains("\"ownerSide\":true"));
        assert!(!json.contains("javadoc"));
        assert!(!json.contains("otherEntityField"));
    }

    #[test]
    fn test_validation_params_flatten_into_record() {
        let mut record = FieldRecord {
            field_id: 1,
            field_name: "name".to_string(),
            field_type: "String".to_string(),
            comment: None,
            field_values: None,
            field_type_blob_content: None,
            field_validate_rules: Some(vec!["required".to_string(), "minlength".to_string()]),
            field_validate_params: IndexMap::new(),
        };
        record
            .field_validate_params
            .insert("fieldValidateRulesMinlength".to_string(), serde_json::json!(2));

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"fieldValidateRulesMinlength\":2"));

        let back: FieldRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
