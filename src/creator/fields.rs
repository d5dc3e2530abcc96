//! Field assembly: maps class fields and their validations onto an entity.

use tracing::warn;

use crate::entity::{Entity, FieldRecord};
use crate::model::{ClassModel, FieldModel, ParsedModel};
use crate::naming;

/// Append one [`FieldRecord`] per class field, in declaration order.
pub fn assemble_fields(class: &ClassModel, model: &ParsedModel, entity: &mut Entity) {
    for field_id in &class.fields {
        let Some(field) = model.field(field_id) else {
            warn!(
                class = %class.name,
                field_id = %field_id,
                "skipping field with no model entry"
            );
            continue;
        };
        entity.push_field(build_record(field, model));
    }
}

fn build_record(field: &FieldModel, model: &ParsedModel) -> FieldRecord {
    let mut record = FieldRecord {
        field_id: 0,
        field_name: field.name.clone(),
        field_type: String::new(),
        comment: naming::format_comment(field.comment.as_deref()),
        field_values: None,
        field_type_blob_content: None,
        field_validate_rules: None,
        field_validate_params: Default::default(),
    };

    if let Some(registered) = model.registered_type(&field.field_type) {
        record.field_type = registered.name.clone();
    } else if let Some(enumeration) = model.enumeration(&field.field_type) {
        record.field_type = enumeration.name.clone();
        record.field_values = Some(enumeration.values.join(","));
    } else {
        // Unresolvable identifiers pass through verbatim.
        record.field_type = field.field_type.clone();
    }

    match record.field_type.as_str() {
        "ImageBlob" => {
            record.field_type = "byte[]".to_string();
            record.field_type_blob_content = Some("image".to_string());
        }
        "Blob" | "AnyBlob" => {
            record.field_type = "byte[]".to_string();
            record.field_type_blob_content = Some("any".to_string());
        }
        _ => {}
    }

    // Absence of the rule list means "no constraints"; an empty list would
    // read as an empty constraint set downstream.
    if !field.validations.is_empty() {
        let mut rules = Vec::with_capacity(field.validations.len());
        for validation_id in &field.validations {
            let Some(validation) = model.validation(validation_id) else {
                warn!(
                    field = %field.name,
                    validation_id = %validation_id,
                    "skipping validation with no model entry"
                );
                continue;
            };
            rules.push(validation.name.clone());
            if validation.name != "required" {
                if let Some(value) = &validation.value {
                    let key = format!("fieldValidateRules{}", naming::capitalize(&validation.name));
                    record.field_validate_params.insert(key, value.clone());
                }
            }
        }
        record.field_validate_rules = Some(rules);
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumModel, TypeModel, ValidationModel};

    fn model_with_types() -> ParsedModel {
        let mut model = ParsedModel::default();
        model.types.insert(
            "t_string".to_string(),
            TypeModel {
                name: "String".to_string(),
            },
        );
        model.types.insert(
            "t_image".to_string(),
            TypeModel {
                name: "ImageBlob".to_string(),
            },
        );
        model.types.insert(
            "t_blob".to_string(),
            TypeModel {
                name: "Blob".to_string(),
            },
        );
        model.types.insert(
            "t_anyblob".to_string(),
            TypeModel {
                name: "AnyBlob".to_string(),
            },
        );
        model.enums.insert(
            "e_language".to_string(),
            EnumModel {
                name: "Language".to_string(),
                values: vec!["FRENCH".to_string(), "ENGLISH".to_string()],
            },
        );
        model.validations.insert(
            "v_required".to_string(),
            ValidationModel {
                name: "required".to_string(),
                value: None,
            },
        );
        model.validations.insert(
            "v_minlength".to_string(),
            ValidationModel {
                name: "minlength".to_string(),
                value: Some(serde_json::json!(2)),
            },
        );
        model
    }

    fn field(name: &str, field_type: &str, validations: Vec<&str>) -> FieldModel {
        FieldModel {
            name: name.to_string(),
            field_type: field_type.to_string(),
            comment: None,
            validations: validations.into_iter().map(String::from).collect(),
        }
    }

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
    fn test_scalar_type_resolution() {
        let model = model_with_types();
        let record = build_record(&field("name", "t_string", vec![]), &model);

        assert_eq!(record.field_type, "String");
        assert_eq!(record.field_values, None);
        assert_eq!(record.field_validate_rules, None);
    }

    #[test]
    fn test_enum_type_attaches_joined_values() {
        let model = model_with_types();
        let record = build_record(&field("language", "e_language", vec![]), &model);

        assert_eq!(record.field_type, "Language");
        assert_eq!(record.field_values, Some("FRENCH,ENGLISH".to_string()));
    }

    #[test]
    fn test_image_blob_rewrite() {
        let model = model_with_types();
        let record = build_record(&field("cover", "t_image", vec![]), &model);

        assert_eq!(record.field_type, "byte[]");
        assert_eq!(record.field_type_blob_content, Some("image".to_string()));
    }

    #[test]
    fn test_plain_blob_rewrite() {
        let model = model_with_types();
        for type_id in ["t_blob", "t_anyblob"] {
            let record = build_record(&field("payload", type_id, vec![]), &model);

            assert_eq!(record.field_type, "byte[]");
            assert_eq!(record.field_type_blob_content, Some("any".to_string()));
        }
    }

    #[test]
    fn test_field_comment_carried_trimmed() {
        let model = model_with_types();
        let mut commented = field("name", "t_string", vec![]);
        commented.comment = Some("  the author's display name  ".to_string());
        let record = build_record(&commented, &model);

        assert_eq!(
            record.comment,
            Some("the author's display name".to_string())
        );

        let blank = field("title", "t_string", vec![]);
        assert_eq!(build_record(&blank, &model).comment, None);
    }

    #[test]
    fn test_validations_keep_order_and_record_params() {
        let model = model_with_types();
        let record = build_record(
            &field("name", "t_string", vec!["v_required", "v_minlength"]),
            &model,
        );

        assert_eq!(
            record.field_validate_rules,
            Some(vec!["required".to_string(), "minlength".to_string()])
        );
        // "required" records no parameter; "minlength" does.
        assert_eq!(record.field_validate_params.len(), 1);
        assert_eq!(
            record.field_validate_params["fieldValidateRulesMinlength"],
            serde_json::json!(2)
        );
    }

    #[test]
    fn test_fields_assembled_in_declaration_order_with_sequence_ids() {
        let mut model = model_with_types();
        model
            .fields
            .insert("f1".to_string(), field("name", "t_string", vec![]));
        model
            .fields
            .insert("f2".to_string(), field("language", "e_language", vec![]));
        let class = ClassModel {
            name: "Book".to_string(),
            table_name: String::new(),
            comment: None,
            fields: vec!["f1".to_string(), "f2".to_string()],
            dto: "no".to_string(),
            pagination: "no".to_string(),
            service: "no".to_string(),
            microservice_name: None,
            search_engine: None,
        };

        let mut entity = empty_entity();
        assemble_fields(&class, &model, &mut entity);

        assert_eq!(entity.fields.len(), 2);
        assert_eq!(entity.fields[0].field_id, 1);
        assert_eq!(entity.fields[0].field_name, "name");
        assert_eq!(entity.fields[1].field_id, 2);
        assert_eq!(entity.fields[1].field_name, "language");
    }

    #[test]
    fn test_unknown_field_id_is_skipped() {
        let model = model_with_types();
        let class = ClassModel {
            name: "Book".to_string(),
            table_name: String::new(),
            comment: None,
            fields: vec!["missing".to_string()],
            dto: "no".to_string(),
            pagination: "no".to_string(),
            service: "no".to_string(),
            microservice_name: None,
            search_engine: None,
        };

        let mut entity = empty_entity();
        assemble_fields(&class, &model, &mut entity);
        assert!(entity.fields.is_empty());
    }
}
