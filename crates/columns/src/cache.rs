use crate::ColumnRecord;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory of `{uuid}.json` column records.
#[derive(Debug, Clone)]
pub struct ColumnCache {
    dir: PathBuf,
}

impl ColumnCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, uuid: &Uuid) -> PathBuf {
        self.dir.join(format!("{uuid}.json"))
    }

    pub fn contains(&self, uuid: &Uuid) -> bool {
        self.path_for(uuid).is_file()
    }

    /// Read a cached record. `Ok(None)` when the dataset was never fetched.
    pub fn read(&self, uuid: &Uuid) -> io::Result<Option<ColumnRecord>> {
        let path = self.path_for(uuid);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Remove `.part` files left behind by interrupted runs.
    pub fn remove_partial(&self) -> io::Result<usize> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "part") {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Persist a record, replacing any previous one.
    ///
    /// The record is written to a `.part` file first and renamed into place,
    /// so an interrupted write never leaves a truncated `{uuid}.json`.
    pub fn write(&self, record: &ColumnRecord) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let dest = self.path_for(&record.dataset_uuid);
        let tmp = dest.with_extension("json.part");

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Err(e) = std::fs::write(&tmp, json) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }
        if let Err(e) = std::fs::rename(&tmp, &dest) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Column;
    use tempfile::tempdir;

    fn uuid() -> Uuid {
        Uuid::parse_str("9767cb68-8ea9-4f0b-8179-9431abc89f11").unwrap()
    }

    #[test]
    fn test_path_for_uses_uuid_filename() {
        let cache = ColumnCache::new("/data/columns");
        assert_eq!(
            cache.path_for(&uuid()),
            PathBuf::from("/data/columns/9767cb68-8ea9-4f0b-8179-9431abc89f11.json")
        );
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let cache = ColumnCache::new(dir.path().join("nested").join("columns"));
        let record = ColumnRecord::new(uuid(), vec![Column::new("year", "integer")]);

        assert!(!cache.contains(&uuid()));
        assert!(cache.read(&uuid()).unwrap().is_none());

        let path = cache.write(&record).unwrap();
        assert!(path.exists());
        assert!(cache.contains(&uuid()));
        assert_eq!(cache.read(&uuid()).unwrap(), Some(record));

        let leftovers: Vec<_> = std::fs::read_dir(cache.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "part"))
            .collect();
        assert!(leftovers.is_empty(), "temporary file should be renamed away");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempdir().unwrap();
        let cache = ColumnCache::new(dir.path());

        cache
            .write(&ColumnRecord::new(uuid(), vec![Column::new("a", "string")]))
            .unwrap();
        cache
            .write(&ColumnRecord::new(uuid(), vec![Column::new("b", "number")]))
            .unwrap();

        let record = cache.read(&uuid()).unwrap().unwrap();
        assert_eq!(record.fields, vec![Column::new("b", "number")]);
    }

    #[test]
    fn test_failed_rename_removes_part_file() {
        let dir = tempdir().unwrap();
        let cache = ColumnCache::new(dir.path());
        // A non-empty directory at the destination makes the rename fail.
        let dest = cache.path_for(&uuid());
        std::fs::create_dir_all(dest.join("occupied")).unwrap();

        let result = cache.write(&ColumnRecord::new(uuid(), vec![Column::new("a", "string")]));

        assert!(result.is_err());
        assert!(!dest.with_extension("json.part").exists());
        assert!(!cache.contains(&uuid()));
    }

    #[test]
    fn test_remove_partial_leaves_records() {
        let dir = tempdir().unwrap();
        let cache = ColumnCache::new(dir.path());
        cache
            .write(&ColumnRecord::new(uuid(), vec![Column::new("a", "string")]))
            .unwrap();
        let stale = dir.path().join("11111111-2222-3333-4444-555555555555.json.part");
        std::fs::write(&stale, "{").unwrap();

        assert_eq!(cache.remove_partial().unwrap(), 1);
        assert!(!stale.exists());
        assert!(cache.contains(&uuid()));
    }

    #[test]
    fn test_remove_partial_without_dir() {
        let dir = tempdir().unwrap();
        let cache = ColumnCache::new(dir.path().join("absent"));
        assert_eq!(cache.remove_partial().unwrap(), 0);
    }

    #[test]
    fn test_read_corrupt_file_is_invalid_data() {
        let dir = tempdir().unwrap();
        let cache = ColumnCache::new(dir.path());
        std::fs::write(cache.path_for(&uuid()), "{").unwrap();

        let err = cache.read(&uuid()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
