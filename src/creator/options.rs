//! Per-entity generation option resolution.
//!
//! Class models carry generation defaults; callers may supply override
//! collections keyed by class name. An explicit override always wins over the
//! class default, and missing keys are no-ops.

use std::collections::HashMap;

use crate::model::ClassModel;

/// Caller-supplied override collections, each defaulting to empty.
///
/// `dto` and `search` are lists of class names: membership forces the
/// `"mapstruct"` and `"elasticsearch"` values respectively. The maps carry the
/// replacement value per class name.
#[derive(Debug, Clone, Default)]
pub struct GenerationOverrides {
    pub dto: Vec<String>,
    pub pagination: HashMap<String, String>,
    pub service: HashMap<String, String>,
    pub microservice: HashMap<String, String>,
    pub search: Vec<String>,
}

/// Effective option set for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityOptions {
    pub dto: String,
    pub pagination: String,
    pub service: String,
    pub microservice_name: Option<String>,
    pub search_engine: Option<String>,
}

/// Apply overrides onto a class's defaults.
pub fn resolve_options(class: &ClassModel, overrides: &GenerationOverrides) -> EntityOptions {
    let mut options = EntityOptions {
        dto: class.dto.clone(),
        pagination: class.pagination.clone(),
        service: class.service.clone(),
        microservice_name: class.microservice_name.clone(),
        search_engine: class.search_engine.clone(),
    };

    if overrides.dto.iter().any(|name| name == &class.name) {
        options.dto = "mapstruct".to_string();
    }
    if let Some(pagination) = overrides.pagination.get(&class.name) {
        options.pagination = pagination.clone();
    }
    if let Some(service) = overrides.service.get(&class.name) {
        options.service = service.clone();
    }
    if let Some(microservice) = overrides.microservice.get(&class.name) {
        options.microservice_name = Some(microservice.clone());
    }
    if overrides.search.iter().any(|name| name == &class.name) {
        options.search_engine = Some("elasticsearch".to_string());
    }

    options
}
