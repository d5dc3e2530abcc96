//! Error type for entity creation.

use std::fmt;

/// Errors raised by the entity creation pipeline.
///
/// All variants are unrecoverable for the current run: the pipeline either
/// returns a fully resolved entity map or fails before producing any output.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatorError {
    /// A required input (parsed model or storage kind) was not supplied.
    MissingInput {
        what: &'static str,
    },
    /// The model declares associations but the storage kind does not support
    /// relationship modeling.
    UnsupportedModeling {
        storage: String,
    },
    /// An association's endpoints failed structural validity checks.
    InvalidAssociation {
        from: String,
        to: String,
        reason: String,
    },
    /// A prior entity snapshot could not be read or parsed.
    Snapshot(String),
}

impl fmt::Display for CreatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatorError::MissingInput { what } => {
                write!(f, "Missing required input: {}", what)
            }
            CreatorError::UnsupportedModeling { storage } => {
                write!(
                    f,
                    "Associations are not supported for '{}' storage; remove them or switch to relational storage",
                    storage
                )
            }
            CreatorError::InvalidAssociation { from, to, reason } => {
                write!(
                    f,
                    "Invalid association between '{}' and '{}': {}",
                    from, to, reason
                )
            }
            CreatorError::Snapshot(msg) => write!(f, "Snapshot error: {}", msg),
        }
    }
}

impl std::error::Error for CreatorError {}
