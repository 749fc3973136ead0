//! C5: the DRY cache (spec.md §4.5): content-addressed persistence of per-file `CodeBlock`s,
//! mtime-keyed freshness, graceful fallback to in-memory operation on any I/O or schema error.
//!
//! Backed by `rusqlite` (bundled SQLite), the content-addressed small-relational store spec.md
//! §4.5 calls for. `blake3` keys the cache schema to the tokenization config so a
//! `min_duplicate_lines`/normalization change invalidates stale entries automatically
//! (spec.md §4.6: "Threshold interaction with caching ... tag with a config hash").

use super::CodeBlock;
use std::path::{Path, PathBuf};

pub struct DryCache {
    conn: Option<rusqlite::Connection>,
}

impl DryCache {
    /// Opens (creating if necessary) the SQLite cache at `path`, scoped to `config_hash` (a
    /// hash of the tokenization-affecting config, so changing `min_duplicate_lines` or
    /// normalization rules invalidates old entries instead of serving stale blocks). Any
    /// failure degrades to an in-memory/no-op cache rather than propagating (spec.md §4.5/§7:
    /// "any I/O, deserialization, or schema error invalidates the cache location ... without
    /// throwing").
    pub fn open(path: &Path, config_hash: u64) -> Self {
        match Self::try_open(path, config_hash) {
            Ok(conn) => Self { conn: Some(conn) },
            Err(err) => {
                log::debug!("DRY cache unavailable at {}: {err}; degrading to in-memory mode", path.display());
                Self { conn: None }
            }
        }
    }

    /// `cache_enabled: false` per spec.md §4.5: "the cache is not touched at all".
    pub fn disabled() -> Self {
        Self { conn: None }
    }

    fn try_open(path: &Path, config_hash: u64) -> rusqlite::Result<rusqlite::Connection> {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let conn = rusqlite::Connection::open(path)?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS files_{config_hash} (
                file_path TEXT PRIMARY KEY,
                mtime INTEGER NOT NULL,
                content_length INTEGER NOT NULL,
                blocks BLOB NOT NULL
            );"
        ))?;
        Ok(conn)
    }

    fn table(&self, config_hash: u64) -> String {
        format!("files_{config_hash}")
    }

    /// `is_fresh(file, mtime)`: true iff a record exists whose stored mtime exactly equals
    /// `mtime` (spec.md §4.5).
    pub fn is_fresh(&self, config_hash: u64, file_path: &str, mtime: i64) -> bool {
        let Some(conn) = &self.conn else { return false };
        let sql = format!("SELECT mtime FROM {} WHERE file_path = ?1", self.table(config_hash));
        match conn.query_row(&sql, [file_path], |row| row.get::<_, i64>(0)) {
            Ok(stored) => stored == mtime,
            Err(_) => false,
        }
    }

    /// Loads the cached blocks for a fresh file, skipping tokenization entirely (spec.md §4.6
    /// "Cache hit path"). Returns `None` on any cache miss, deserialization failure, or
    /// disabled cache.
    pub fn load(&self, config_hash: u64, file_path: &str) -> Option<Vec<CodeBlock>> {
        let conn = self.conn.as_ref()?;
        let sql = format!("SELECT blocks FROM {} WHERE file_path = ?1", self.table(config_hash));
        let blob: Vec<u8> = conn.query_row(&sql, [file_path], |row| row.get(0)).ok()?;
        postcard::from_bytes(&blob).ok()
    }

    /// Persists `blocks` for `file_path`, upserting on conflict. Failures are swallowed
    /// (spec.md §7: "Cache errors ... Logged at debug level; degrade to in-memory mode").
    pub fn store(&self, config_hash: u64, file_path: &str, mtime: i64, content_length: usize, blocks: &[CodeBlock]) {
        let Some(conn) = &self.conn else { return };
        let Ok(blob) = postcard::to_allocvec(blocks) else {
            return;
        };
        let sql = format!(
            "INSERT INTO {table} (file_path, mtime, content_length, blocks) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(file_path) DO UPDATE SET mtime=excluded.mtime, content_length=excluded.content_length, blocks=excluded.blocks",
            table = self.table(config_hash)
        );
        if let Err(err) = conn.execute(&sql, rusqlite::params![file_path, mtime, content_length as i64, blob]) {
            log::debug!("failed to write DRY cache entry for {file_path}: {err}");
        }
    }

    /// Best-effort eviction of records older than `max_age_days`, run at orchestration start
    /// (spec.md §4.5: "Purging is best-effort; failures are swallowed").
    pub fn purge_older_than(&self, config_hash: u64, max_age_days: u64, now_unix: i64) {
        let Some(conn) = &self.conn else { return };
        let cutoff = now_unix.saturating_sub(max_age_days as i64 * 86_400);
        let sql = format!("DELETE FROM {} WHERE mtime < ?1", self.table(config_hash));
        let _ = conn.execute(&sql, [cutoff]);
    }
}

/// Default cache location under the project root (spec.md §6: "implementation-chosen embedded
/// database under `.thailint-cache/` by default").
pub fn default_cache_path(project_root: &Path) -> PathBuf {
    project_root.join(".thailint-cache").join("dry.sqlite3")
}

/// A stable hash of the DRY config fields that affect tokenization/windowing, used to scope
/// cache tables so a config change can't serve stale blocks for a different normalization.
pub fn config_hash(min_duplicate_lines: usize) -> u64 {
    let digest = blake3::hash(format!("v1:{min_duplicate_lines}").as_bytes());
    u64::from_le_bytes(digest.as_bytes()[0..8].try_into().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dry::CodeBlock;
    use tempfile::TempDir;

    fn block() -> CodeBlock {
        CodeBlock {
            file_path: "a.py".to_string(),
            start_line: 1,
            end_line: 3,
            snippet: "x\ny\nz".to_string(),
            hash_value: 42,
        }
    }

    #[test]
    fn store_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let cache = DryCache::open(&tmp.path().join("cache.sqlite3"), config_hash(3));
        cache.store(config_hash(3), "a.py", 100, 10, &[block()]);
        let loaded = cache.load(config_hash(3), "a.py").unwrap();
        assert_eq!(loaded, vec![block()]);
    }

    #[test]
    fn freshness_requires_exact_mtime_match() {
        let tmp = TempDir::new().unwrap();
        let cache = DryCache::open(&tmp.path().join("cache.sqlite3"), config_hash(3));
        cache.store(config_hash(3), "a.py", 100, 10, &[block()]);
        assert!(cache.is_fresh(config_hash(3), "a.py", 100));
        assert!(!cache.is_fresh(config_hash(3), "a.py", 101));
    }

    #[test]
    fn disabled_cache_never_stores_or_loads() {
        let cache = DryCache::disabled();
        cache.store(config_hash(3), "a.py", 100, 10, &[block()]);
        assert!(cache.load(config_hash(3), "a.py").is_none());
        assert!(!cache.is_fresh(config_hash(3), "a.py", 100));
    }

    #[test]
    fn corrupt_cache_path_degrades_to_in_memory_without_panicking() {
        let tmp = TempDir::new().unwrap();
        let bogus = tmp.path().join("not-a-directory").join("sub").join("cache.sqlite3");
        std::fs::write(tmp.path().join("not-a-directory"), b"not a dir").unwrap();
        let cache = DryCache::open(&bogus, config_hash(3));
        assert!(cache.load(config_hash(3), "a.py").is_none());
    }
}
