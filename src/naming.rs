//! Naming helpers used during entity assembly.

use convert_case::{Case, Casing};

/// Convert a class name to the lower-first camelCase form used when one
/// entity refers to another (e.g. "Book" -> "book", "BookOrder" -> "bookOrder").
pub fn entity_ref_name(class_name: &str) -> String {
    class_name.to_case(Case::Camel)
}

/// Normalize a table name to snake_case.
pub fn to_table_name(name: &str) -> String {
    name.to_case(Case::Snake)
}

/// Uppercase the first character, leaving the rest untouched. Used to build
/// validation parameter keys ("minlength" -> "Minlength").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Trim a source comment, dropping it entirely when blank.
pub fn format_comment(comment: Option<&str>) -> Option<String> {
    comment
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
