//! JSON-file collection store.
//!
//! The persistent mock-mode backing: each collection key maps to one
//! `<key>.json` document inside a capability-scoped directory, mirroring
//! the browser key-value storage the panels originally persisted to. Writes
//! go through a temp-file-and-rename so a crash mid-write never leaves a
//! half-written collection behind. Documents are small, so the synchronous
//! IO inside the async port is deliberate.

use std::io::{self, Write as _};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use serde_json::Value;

use crate::domain::StoreError;
use crate::domain::ports::CollectionStore;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Directory-backed key-value store with atomic document writes.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: Dir,
}

impl JsonFileStore {
    /// Open (creating if needed) the data directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|error| {
            StoreError::write(path.display().to_string(), error.to_string())
        })?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(|error| {
            StoreError::write(path.display().to_string(), error.to_string())
        })?;
        Ok(Self { dir })
    }

    fn file_name(key: &str) -> String {
        format!("{key}.json")
    }

    fn write_atomic(&self, key: &str, contents: &str) -> Result<(), StoreError> {
        let target = Self::file_name(key);
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let tmp_name = format!(".{target}.tmp.{}.{nanos}.{counter}", std::process::id());

        self.write_temp(key, &tmp_name, contents)?;
        if let Err(error) = self.dir.rename(&tmp_name, &self.dir, &target) {
            // Best-effort cleanup of the temp file on rename failure.
            drop(self.dir.remove_file(&tmp_name));
            return Err(StoreError::write(key, error.to_string()));
        }
        Ok(())
    }

    fn write_temp(&self, key: &str, tmp_name: &str, contents: &str) -> Result<(), StoreError> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self
            .dir
            .open_with(tmp_name, &options)
            .map_err(|error| StoreError::write(key, error.to_string()))?;

        let outcome = file
            .write_all(contents.as_bytes())
            .and_then(|()| file.sync_all());
        if let Err(error) = outcome {
            drop(file);
            drop(self.dir.remove_file(tmp_name));
            return Err(StoreError::write(key, error.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let contents = match self.dir.read_to_string(Self::file_name(key)) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(StoreError::read(key, error.to_string())),
        };
        let document = serde_json::from_str(&contents)
            .map_err(|error| StoreError::corrupt(key, error.to_string()))?;
        Ok(Some(document))
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        let contents = serde_json::to_string(document)
            .map_err(|error| StoreError::write(key, error.to_string()))?;
        self.write_atomic(key, &contents)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn store() -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::open(dir.path()).expect("store opens");
        (dir, store)
    }

    #[tokio::test]
    async fn absent_keys_load_as_none() {
        let (_dir, store) = store();

        let loaded = store.load("admin_tags_v1").await.expect("load succeeds");

        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn documents_survive_reopening_the_directory() {
        let dir = TempDir::new().expect("temp dir");
        let document = json!([{ "id": "tag1", "name": "vegan" }]);

        {
            let store = JsonFileStore::open(dir.path()).expect("store opens");
            store
                .save("admin_tags_v1", &document)
                .await
                .expect("save succeeds");
        }

        let reopened = JsonFileStore::open(dir.path()).expect("store reopens");
        let loaded = reopened.load("admin_tags_v1").await.expect("load succeeds");

        assert_eq!(loaded, Some(document));
    }

    #[tokio::test]
    async fn rotated_keys_do_not_collide() {
        let (_dir, store) = store();

        store
            .save("admin_tags_v1", &json!(["old"]))
            .await
            .expect("v1 save");
        store
            .save("admin_tags_v2", &json!(["new"]))
            .await
            .expect("v2 save");

        let v1 = store.load("admin_tags_v1").await.expect("v1 load");
        let v2 = store.load("admin_tags_v2").await.expect("v2 load");
        assert_eq!(v1, Some(json!(["old"])));
        assert_eq!(v2, Some(json!(["new"])));
    }

    #[tokio::test]
    async fn corrupt_documents_surface_as_corrupt_errors() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("admin_tags_v1.json"), b"not json")
            .expect("write corrupt file");
        let store = JsonFileStore::open(dir.path()).expect("store opens");

        let error = store
            .load("admin_tags_v1")
            .await
            .expect_err("corrupt document fails");

        assert!(matches!(error, StoreError::Corrupt { .. }));
    }
}
