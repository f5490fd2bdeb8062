use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::json_store::JsonStore;

const WORDS_EN: &str = include_str!("../assets/words-en.json");

/// One practice item. Identity is the lowercased word; the example sentence
/// is presentation-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordEntry {
    #[serde(alias = "w")]
    pub word: String,
    #[serde(alias = "s", default)]
    pub example: String,
}

impl WordEntry {
    pub fn key(&self) -> String {
        self.word.to_lowercase()
    }
}

impl PartialEq for WordEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for WordEntry {}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("word list fetch failed: {0}")]
    Fetch(String),
    #[error("word list was empty or malformed")]
    Empty,
}

/// The full set of available word/example pairs. Populated once at startup,
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct WordCatalog {
    entries: Vec<WordEntry>,
}

impl WordCatalog {
    /// Built-in default list, embedded at compile time.
    pub fn defaults() -> Self {
        let entries: Vec<WordEntry> = serde_json::from_str(WORDS_EN).unwrap_or_default();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<WordEntry>) -> Result<Self, CatalogError> {
        let entries: Vec<WordEntry> = entries
            .into_iter()
            .filter(|e| !e.word.trim().is_empty())
            .collect();
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries })
    }

    /// Load order: remote fetch (when built with the `network` feature and a
    /// URL is configured) -> cached copy from a previous fetch -> embedded
    /// defaults. Every failure falls through silently; the session only sees
    /// a non-empty catalog.
    pub fn load(store: Option<&JsonStore>, words_url: Option<&str>) -> Self {
        #[cfg(feature = "network")]
        if let Some(url) = words_url {
            if let Ok(catalog) = Self::fetch(url) {
                if let Some(store) = store {
                    let _ = store.save_catalog_cache(&catalog.entries);
                }
                return catalog;
            }
        }
        #[cfg(not(feature = "network"))]
        let _ = words_url;

        if let Some(store) = store {
            let cached = store.load_catalog_cache();
            if let Ok(catalog) = Self::from_entries(cached) {
                return catalog;
            }
        }

        Self::defaults()
    }

    #[cfg(feature = "network")]
    fn fetch(url: &str) -> Result<Self, CatalogError> {
        #[derive(Deserialize)]
        struct WordsResponse {
            words: Vec<WordEntry>,
        }

        let resp = reqwest::blocking::get(url)
            .and_then(|r| r.error_for_status())
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;
        let data: WordsResponse = resp
            .json()
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;
        Self::from_entries(data.words)
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&WordEntry> {
        self.entries.first()
    }
}
