//! Input object model consumed by the entity creation pipeline.
//!
//! These types mirror what the upstream model loader produces: classes with
//! fields and validations, enumerations, registered scalar types, and directed
//! associations. They are read-only inputs; the pipeline never mutates them
//! (association cardinality rewrites are tracked in a separate normalized
//! view, see [`crate::creator::NormalizedAssociations`]).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_option() -> String {
    "no".to_string()
}

/// Association cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Cardinality::OneToOne => "one-to-one",
            Cardinality::OneToMany => "one-to-many",
            Cardinality::ManyToOne => "many-to-one",
            Cardinality::ManyToMany => "many-to-many",
        };
        write!(f, "{}", s)
    }
}

/// Storage backend the entities are generated for.
///
/// Associations are only supported for relational storage; the pipeline
/// rejects any model that declares associations under a non-relational kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Sql,
    Mongodb,
    Cassandra,
}

impl StorageKind {
    pub fn is_relational(&self) -> bool {
        matches!(self, StorageKind::Sql)
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StorageKind::Sql => "sql",
            StorageKind::Mongodb => "mongodb",
            StorageKind::Cassandra => "cassandra",
        };
        write!(f, "{}", s)
    }
}

/// A class extracted from the source model.
///
/// `fields` holds field identifiers in declaration order; the generation
/// option members are class-level defaults that per-entity overrides may
/// replace during resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default = "default_option")]
    pub dto: String,
    #[serde(default = "default_option")]
    pub pagination: String,
    #[serde(default = "default_option")]
    pub service: String,
    #[serde(default)]
    pub microservice_name: Option<String>,
    #[serde(default)]
    pub search_engine: Option<String>,
}

/// A class field. `field_type` is an identifier resolved against the model's
/// registered types first, then its enumerations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldModel {
    pub name: String,
    pub field_type: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub validations: Vec<String>,
}

/// A validation rule attached to a field (e.g. "required", "minlength").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationModel {
    pub name: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// A registered scalar type (e.g. "String", "ImageBlob").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeModel {
    pub name: String,
}

/// An enumeration with its ordered value list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumModel {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A directed association between two classes.
///
/// The injected field strings encode `<relationshipName>(<otherEntityField>)`
/// and are decoded once per resolution via [`InjectedField::parse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationModel {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub association_type: Cardinality,
    #[serde(default)]
    pub injected_field_in_from: Option<String>,
    #[serde(default)]
    pub injected_field_in_to: Option<String>,
}

/// Decoded injected-field descriptor.
///
/// `name(otherField)` decodes to name + other-field; the other-field defaults
/// to `"id"` when omitted, and an absent descriptor decodes to an empty
/// relationship name with the default other-field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedField {
    pub relationship_name: String,
    pub other_entity_field: String,
}

impl InjectedField {
    pub fn parse(descriptor: Option<&str>) -> Self {
        let Some(descriptor) = descriptor else {
            return InjectedField {
                relationship_name: String::new(),
                other_entity_field: "id".to_string(),
            };
        };
        match descriptor.find('(') {
            Some(open) => {
                let name = descriptor[..open].trim();
                let field = descriptor[open + 1..].trim_end_matches(')').trim();
                InjectedField {
                    relationship_name: name.to_string(),
                    other_entity_field: if field.is_empty() {
                        "id".to_string()
                    } else {
                        field.to_string()
                    },
                }
            }
            None => InjectedField {
                relationship_name: descriptor.trim().to_string(),
                other_entity_field: "id".to_string(),
            },
        }
    }

    /// True when the descriptor carried an explicit relationship name.
    pub fn is_named(&self) -> bool {
        !self.relationship_name.is_empty()
    }
}

/// The full parsed model: classes, fields, validations, registered types,
/// enumerations and associations, all keyed by identifier.
///
/// Collections are `IndexMap`s so iteration order is load order; the
/// changelog-date allocator and sequence-id determinism rely on that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedModel {
    #[serde(default)]
    pub classes: IndexMap<String, ClassModel>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldModel>,
    #[serde(default)]
    pub validations: IndexMap<String, ValidationModel>,
    #[serde(default)]
    pub types: IndexMap<String, TypeModel>,
    #[serde(default)]
    pub enums: IndexMap<String, EnumModel>,
    #[serde(default)]
    pub associations: IndexMap<String, AssociationModel>,
}

impl ParsedModel {
    pub fn class(&self, id: &str) -> Option<&ClassModel> {
        self.classes.get(id)
    }

    pub fn class_by_name(&self, name: &str) -> Option<(&String, &ClassModel)> {
        self.classes.iter().find(|(_, c)| c.name == name)
    }

    pub fn field(&self, id: &str) -> Option<&FieldModel> {
        self.fields.get(id)
    }

    pub fn validation(&self, id: &str) -> Option<&ValidationModel> {
        self.validations.get(id)
    }

    pub fn registered_type(&self, id: &str) -> Option<&TypeModel> {
        self.types.get(id)
    }

    pub fn enumeration(&self, id: &str) -> Option<&EnumModel> {
        self.enums.get(id)
    }

    pub fn has_associations(&self) -> bool {
        !self.associations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_descriptor() {
        let field = InjectedField::parse(Some("books(title)"));
        assert_eq!(field.relationship_name, "books");
        assert_eq!(field.other_entity_field, "title");
        assert!(field.is_named());
    }

    #[test]
    fn test_parse_name_only_defaults_other_field() {
        let field = InjectedField::parse(Some("books"));
        assert_eq!(field.relationship_name, "books");
        assert_eq!(field.other_entity_field, "id");
    }

    #[test]
    fn test_parse_absent_descriptor() {
        let field = InjectedField::parse(None);
        assert_eq!(field.relationship_name, "");
        assert_eq!(field.other_entity_field, "id");
        assert!(!field.is_named());
    }

    #[test]
    fn test_parse_empty_parens_defaults_other_field() {
        let field = InjectedField::parse(Some("owner()"));
        assert_eq!(field.relationship_name, "owner");
        assert_eq!(field.other_entity_field, "id");
    }

    #[test]
    fn test_storage_kind_relational() {
        assert!(StorageKind::Sql.is_relational());
        assert!(!StorageKind::Mongodb.is_relational());
        assert!(!StorageKind::Cassandra.is_relational());
    }

    #[test]
    fn test_class_by_name_lookup() {
        let mut model = ParsedModel::default();
        model.classes.insert(
            "c_author".to_string(),
            ClassModel {
                name: "Author".to_string(),
                table_name: String::new(),
                comment: None,
                fields: vec![],
                dto: "no".to_string(),
                pagination: "no".to_string(),
                service: "no".to_string(),
                microservice_name: None,
                search_engine: None,
            },
        );

        let (id, class) = model.class_by_name("Author").unwrap();
        assert_eq!(id, "c_author");
        assert_eq!(class.name, "Author");
        assert!(model.class_by_name("Book").is_none());
    }

    #[test]
    fn test_cardinality_serialization() {
        let json = serde_json::to_string(&Cardinality::OneToMany).unwrap();
        assert_eq!(json, "\"one-to-many\"");
        let back: Cardinality = serde_json::from_str("\"many-to-one\"").unwrap();
        assert_eq!(back, Cardinality::ManyToOne);
    }
}
