use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::WordEntry;
use crate::session::stats::Tally;

const SCHEMA_VERSION: u32 = 1;

/// Lifetime correct/attempt counters. Only ever appended to; survives
/// session restarts and process restarts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsData {
    pub schema_version: u32,
    pub stats: Tally,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for StatsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            stats: Tally::default(),
            updated_at: None,
        }
    }
}

impl StatsData {
    pub fn new(stats: Tally) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            stats,
            updated_at: Some(Utc::now()),
        }
    }

    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

/// Last successfully fetched word list, so the trainer works offline with
/// the most recent remote catalog instead of the embedded defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogCacheData {
    pub schema_version: u32,
    pub words: Vec<WordEntry>,
}

impl Default for CatalogCacheData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            words: Vec::new(),
        }
    }
}

impl CatalogCacheData {
    pub fn new(words: Vec<WordEntry>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            words,
        }
    }

    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
