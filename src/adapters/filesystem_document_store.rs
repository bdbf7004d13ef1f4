use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use crate::domain::records::newest_first;
use crate::domain::{AppError, Collection, ObjectId, StoredDocument, UserId};
use crate::ports::DocumentStore;

/// Filesystem-based document store.
///
/// Each document is one pretty-printed JSON file at
/// `<root>/<collection>/<id>.json`, written through a sibling `.json.tmp`
/// file and renamed into place.
#[derive(Debug, Clone)]
pub struct FilesystemDocumentStore {
    root: PathBuf,
}

impl FilesystemDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.as_str())
    }

    fn document_path(&self, collection: Collection, id: &ObjectId) -> PathBuf {
        self.collection_dir(collection).join(format!("{}.json", id))
    }

    fn write_document(&self, path: &Path, document: &StoredDocument) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(document)?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, format!("{}\n", content))?;
        if let Err(err) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }

    fn read_document(&self, path: &Path) -> Result<StoredDocument, AppError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|err| {
            AppError::Storage(format!("Corrupt document {}: {}", path.display(), err))
        })
    }
}

impl DocumentStore for FilesystemDocumentStore {
    fn insert(
        &self,
        collection: Collection,
        user_id: &UserId,
        body: Value,
    ) -> Result<StoredDocument, AppError> {
        let document = StoredDocument {
            id: ObjectId::generate(),
            user_id: user_id.clone(),
            created_at: Utc::now(),
            body,
        };
        self.write_document(&self.document_path(collection, &document.id), &document)?;
        Ok(document)
    }

    fn find_by_user(
        &self,
        collection: Collection,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>, AppError> {
        let entries = match fs::read_dir(self.collection_dir(collection)) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match self.read_document(&path) {
                Ok(document) if &document.user_id == user_id => documents.push(document),
                Ok(_) => {}
                // Owner unknown, so skip rather than fail every reader.
                Err(AppError::Storage(reason)) => {
                    tracing::warn!(%reason, "Skipping unreadable document");
                }
                Err(err) => return Err(err),
            }
        }

        documents.sort_by(newest_first);
        if let Some(limit) = limit {
            documents.truncate(limit);
        }
        Ok(documents)
    }

    fn find_by_id(
        &self,
        collection: Collection,
        id: &ObjectId,
    ) -> Result<Option<StoredDocument>, AppError> {
        let path = self.document_path(collection, id);
        if !path.is_file() {
            return Ok(None);
        }
        self.read_document(&path).map(Some)
    }

    fn replace(&self, collection: Collection, document: &StoredDocument) -> Result<(), AppError> {
        let path = self.document_path(collection, &document.id);
        if !path.is_file() {
            return Err(AppError::not_found(format!(
                "Document {} not found in {}",
                document.id, collection
            )));
        }
        self.write_document(&path, document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::store_contract;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, FilesystemDocumentStore) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = FilesystemDocumentStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn insert_then_find_by_id() {
        let (_dir, store) = test_store();
        store_contract::insert_then_find_by_id(&store);
    }

    #[test]
    fn find_by_user_is_newest_first_and_limited() {
        let (_dir, store) = test_store();
        store_contract::find_by_user_is_newest_first_and_limited(&store);
    }

    #[test]
    fn collections_are_isolated() {
        let (_dir, store) = test_store();
        store_contract::collections_are_isolated(&store);
    }

    #[test]
    fn replace_requires_existing_document() {
        let (_dir, store) = test_store();
        store_contract::replace_requires_existing_document(&store);
    }

    #[test]
    fn documents_are_written_under_collection_dir() {
        let (_dir, store) = test_store();
        let user = UserId::parse("678fe640180fa929cc64f786").unwrap();
        let document =
            store.insert(Collection::Quizzes, &user, serde_json::json!({"k": 1})).unwrap();

        let path = store.root().join("quizzes").join(format!("{}.json", document.id));
        let raw = fs::read_to_string(path).unwrap();
        assert!(raw.contains("\"_id\""));
        assert!(raw.contains("\"userId\": \"678fe640180fa929cc64f786\""));
    }

    #[test]
    fn missing_collection_reads_as_empty() {
        let (_dir, store) = test_store();
        let user = UserId::parse("678fe640180fa929cc64f786").unwrap();
        assert!(store.find_by_user(Collection::Roadmaps, &user, None).unwrap().is_empty());
    }

    #[test]
    fn corrupt_document_does_not_hide_other_documents() {
        let (_dir, store) = test_store();
        let user = UserId::parse("678fe640180fa929cc64f786").unwrap();
        let kept =
            store.insert(Collection::Roadmaps, &user, serde_json::json!({"k": 1})).unwrap();
        let dir = store.root().join("roadmaps");
        fs::write(dir.join("65a1b2c3d4e5f60718293a4b.json"), "not json").unwrap();

        let found = store.find_by_user(Collection::Roadmaps, &user, None).unwrap();
        assert_eq!(found, vec![kept]);
    }

    #[test]
    fn corrupt_document_by_id_is_a_storage_error() {
        let (_dir, store) = test_store();
        let dir = store.root().join("roadmaps");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("65a1b2c3d4e5f60718293a4b.json"), "{\"_id\":").unwrap();

        let id = ObjectId::parse("65a1b2c3d4e5f60718293a4b").unwrap();
        let err = store.find_by_id(Collection::Roadmaps, &id).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[test]
    fn writes_leave_no_temp_files_and_ignore_stale_ones() {
        let (_dir, store) = test_store();
        let user = UserId::parse("678fe640180fa929cc64f786").unwrap();
        let mut document =
            store.insert(Collection::Roadmaps, &user, serde_json::json!({"v": 1})).unwrap();
        document.body = serde_json::json!({"v": 2});
        store.replace(Collection::Roadmaps, &document).unwrap();

        let dir = store.root().join("roadmaps");
        let names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![format!("{}.json", document.id)]);

        fs::write(dir.join("65a1b2c3d4e5f60718293a4b.json.tmp"), "{\"half").unwrap();
        let found = store.find_by_user(Collection::Roadmaps, &user, None).unwrap();
        assert_eq!(found, vec![document]);
    }
}
