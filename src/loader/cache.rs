use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use sha2::{Digest, Sha256};

use crate::{
    data_types::activity::RideTable,
    errors::{DashboardError, Result},
    logvbln,
};

use super::RideLoader;

struct CachedTable {
    digest: [u8; 32],
    table: Arc<RideTable>,
}

/// Read-through cache of loaded tables, keyed by path and checked against the file's
/// SHA-256 digest so an edited file is parsed again.
#[derive(Default)]
pub struct TableCache {
    entries: Mutex<HashMap<PathBuf, CachedTable>>,
}

impl TableCache {
    const CC: &'static str = "TableCache";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<RideTable>> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let digest: [u8; 32] = Sha256::digest(&bytes).into();
        let key = Self::key(path);

        if let Some(cached) = self.entries().get(&key) {
            if cached.digest == digest {
                logvbln!("Cache hit for {}", key.display());
                return Ok(Arc::clone(&cached.table));
            }
        }

        logvbln!("Cache miss for {}", key.display());
        let table = Arc::new(RideLoader::parse_file(path, &bytes)?);
        self.entries().insert(
            key,
            CachedTable {
                digest,
                table: Arc::clone(&table),
            },
        );

        Ok(table)
    }

    /// Drops the entry for `path`. Returns whether one was cached.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        self.entries().remove(&Self::key(path.as_ref())).is_some()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn key(path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, CachedTable>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "Recorded On,Activity Date,Start Time,Finish Time,Distance,Duration,Max Speed\n";

    fn write_csv(file: &tempfile::NamedTempFile, rows: &[&str]) {
        let mut content = HEADER.to_string();
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        std::fs::write(file.path(), content).unwrap();
    }

    #[test]
    fn reuses_table_for_unchanged_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_csv(&file, &["x,2023-06-01,a,b,20.0,3600,40.0"]);

        let cache = TableCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(*first, RideLoader::load(file.path()).unwrap());
    }

    #[test]
    fn reloads_when_content_changes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_csv(&file, &["x,2023-06-01,a,b,20.0,3600,40.0"]);

        let cache = TableCache::new();
        let first = cache.get_or_load(file.path()).unwrap();

        write_csv(
            &file,
            &["x,2023-06-01,a,b,20.0,3600,40.0", "x,2023-06-02,a,b,5.0,900,25.0"],
        );
        let second = cache.get_or_load(file.path()).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_forces_parse() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_csv(&file, &["x,2023-06-01,a,b,20.0,3600,40.0"]);

        let cache = TableCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        assert!(cache.invalidate(file.path()));
        assert!(!cache.invalidate(file.path()));
        assert!(cache.is_empty());

        let second = cache.get_or_load(file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn bad_file_is_not_cached() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Distance,Duration\n1.0,60\n").unwrap();
        file.flush().unwrap();

        let cache = TableCache::new();
        assert!(matches!(
            cache.get_or_load(file.path()),
            Err(DashboardError::DataFormat { .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let cache = TableCache::new();
        assert!(matches!(
            cache.get_or_load("/definitely/not/here.csv"),
            Err(DashboardError::Io { .. })
        ));
    }
}
