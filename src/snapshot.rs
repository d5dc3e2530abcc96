//! On-disk entity snapshots.
//!
//! Each previously generated entity is persisted as one JSON file named after
//! its class (`<ClassName>.json`) under a snapshot directory. Snapshots are
//! read at the start of a run solely to preserve changelog dates across
//! regenerations, and written back after a successful run.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::CreatorError;

/// The subset of a persisted entity file the pipeline needs when seeding a
/// new run. Unknown members are ignored so snapshots written by newer
/// generators still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySnapshot {
    pub changelog_date: String,
}

/// Load all snapshots from a directory, keyed by class name (the file stem).
///
/// A missing directory is not an error: first runs have no prior state and
/// get an empty map. A present but unreadable or unparseable snapshot is
/// fatal, since silently ignoring it would reassign changelog dates.
pub fn load_snapshots(dir: &Path) -> Result<HashMap<String, EntitySnapshot>, CreatorError> {
    let mut snapshots = HashMap::new();

    if !dir.exists() {
        return Ok(snapshots);
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        CreatorError::Snapshot(format!("failed to read directory {}: {}", dir.display(), e))
    })?;

    for entry in entries {
        let entry = entry
            .map_err(|e| CreatorError::Snapshot(format!("failed to read directory entry: {}", e)))?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(class_name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let contents = fs::read_to_string(&path).map_err(|e| {
            CreatorError::Snapshot(format!("failed to read {}: {}", path.display(), e))
        })?;
        let snapshot: EntitySnapshot = serde_json::from_str(&contents).map_err(|e| {
            CreatorError::Snapshot(format!("failed to parse {}: {}", path.display(), e))
        })?;

        snapshots.insert(class_name.to_string(), snapshot);
    }

    Ok(snapshots)
}

/// Write one JSON file per entity under `dir`, creating the directory if
/// needed. Entities are keyed by class name, which becomes the file stem.
pub fn write_snapshots<'a, I>(dir: &Path, entities: I) -> Result<(), CreatorError>
where
    I: IntoIterator<Item = (&'a str, &'a Entity)>,
{
    fs::create_dir_all(dir).map_err(|e| {
        CreatorError::Snapshot(format!("failed to create {}: {}", dir.display(), e))
    })?;

    for (class_name, entity) in entities {
        let path = dir.join(format!("{}.json", class_name));
        let contents = serde_json::to_string_pretty(entity)
            .map_err(|e| CreatorError::Snapshot(format!("failed to serialize {}: {}", class_name, e)))?;
        fs::write(&path, contents).map_err(|e| {
            CreatorError::Snapshot(format!("failed to write {}: {}", path.display(), e))
        })?;
    }

    Ok(())
}
