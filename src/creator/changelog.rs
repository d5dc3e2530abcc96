//! Changelog-date allocation.
//!
//! Every entity gets a stable `YYYYMMDDHHMMSS` identifier that orders its
//! generated migrations. A previously persisted value always wins so an
//! entity keeps its identifier across regenerations; new entities get the
//! run's base time plus their ordinal position in seconds, which keeps the
//! identifiers distinct and increasing within one run.

use chrono::{DateTime, Duration, SubsecRound, Utc};

const CHANGELOG_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Clone)]
pub struct ChangelogAllocator {
    base: DateTime<Utc>,
}

impl ChangelogAllocator {
    /// Allocator based at the current UTC time, truncated to whole seconds.
    pub fn new() -> Self {
        Self::from_base(Utc::now())
    }

    /// Allocator with an explicit base time. Sub-second precision is dropped.
    pub fn from_base(base: DateTime<Utc>) -> Self {
        ChangelogAllocator {
            base: base.trunc_subsecs(0),
        }
    }

    /// Changelog date for the class at 0-based ordinal `ordinal`, preferring
    /// the persisted `prior` value when one exists.
    pub fn allocate(&self, ordinal: usize, prior: Option<&str>) -> String {
        if let Some(prior) = prior {
            return prior.to_string();
        }
        let at = self.base + Duration::seconds(ordinal as i64);
        at.format(CHANGELOG_FORMAT).to_string()
    }
}

impl Default for ChangelogAllocator {
    fn default() -> Self {
        Self::new()
    }
}
