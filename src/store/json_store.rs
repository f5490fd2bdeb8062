use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::catalog::WordEntry;
use crate::session::stats::Tally;
use crate::store::schema::{CatalogCacheData, StatsData};

/// Best-effort JSON persistence under the platform data dir. Callers treat
/// save failures as non-fatal; the in-memory session stays authoritative.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spellstr");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Lifetime tally, or zeroes when missing, unparseable, or from a stale
    /// schema.
    pub fn load_stats(&self) -> Tally {
        let data: StatsData = self.load("stats.json");
        if data.needs_reset() {
            Tally::default()
        } else {
            data.stats
        }
    }

    pub fn save_stats(&self, stats: Tally) -> Result<()> {
        self.save("stats.json", &StatsData::new(stats))
    }

    pub fn load_catalog_cache(&self) -> Vec<WordEntry> {
        let data: CatalogCacheData = self.load("words.json");
        if data.needs_reset() {
            Vec::new()
        } else {
            data.words
        }
    }

    pub fn save_catalog_cache(&self, words: &[WordEntry]) -> Result<()> {
        self.save("words.json", &CatalogCacheData::new(words.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_stats_round_trip() {
        let (_dir, store) = make_test_store();
        let tally = Tally {
            correct: 7,
            attempts: 11,
        };
        store.save_stats(tally).unwrap();
        assert_eq!(store.load_stats(), tally);
    }

    #[test]
    fn test_missing_files_load_as_defaults() {
        let (_dir, store) = make_test_store();
        assert_eq!(store.load_stats(), Tally::default());
        assert!(store.load_catalog_cache().is_empty());
    }

    #[test]
    fn test_corrupt_stats_file_loads_as_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path("stats.json"), "not json {{{").unwrap();
        assert_eq!(store.load_stats(), Tally::default());
    }

    #[test]
    fn test_stale_schema_version_resets() {
        let (_dir, store) = make_test_store();
        fs::write(
            store.file_path("stats.json"),
            r#"{"schema_version": 99, "stats": {"correct": 5, "attempts": 9}, "updated_at": null}"#,
        )
        .unwrap();
        assert_eq!(store.load_stats(), Tally::default());
    }

    #[test]
    fn test_catalog_cache_round_trip() {
        let (_dir, store) = make_test_store();
        let words = vec![
            WordEntry {
                word: "apple".to_string(),
                example: "An apple a day.".to_string(),
            },
            WordEntry {
                word: "school".to_string(),
                example: "We walk to school.".to_string(),
            },
        ];
        store.save_catalog_cache(&words).unwrap();
        let loaded = store.load_catalog_cache();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].word, "apple");
        assert_eq!(loaded[1].example, "We walk to school.");
    }

    #[test]
    fn test_save_leaves_no_tmp_file() {
        let (dir, store) = make_test_store();
        store.save_stats(Tally::default()).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty());
    }
}
