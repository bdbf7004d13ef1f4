use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde_json::Value;

use crate::domain::records::newest_first;
use crate::domain::{AppError, Collection, ObjectId, StoredDocument, UserId};
use crate::ports::DocumentStore;

type Documents = HashMap<(Collection, ObjectId), StoredDocument>;

/// In-memory document store.
///
/// Clones share the same underlying documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<Mutex<Documents>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held in `collection`.
    pub fn count(&self, collection: Collection) -> usize {
        self.lock().map(|docs| docs.keys().filter(|(c, _)| *c == collection).count()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Documents>, AppError> {
        self.documents.lock().map_err(|_| AppError::Storage("document store lock poisoned".into()))
    }
}

impl DocumentStore for MemoryDocumentStore {
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
        self.lock()?.insert((collection, document.id.clone()), document.clone());
        Ok(document)
    }

    fn find_by_user(
        &self,
        collection: Collection,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>, AppError> {
        let mut documents: Vec<StoredDocument> = self
            .lock()?
            .iter()
            .filter(|((c, _), doc)| *c == collection && &doc.user_id == user_id)
            .map(|(_, doc)| doc.clone())
            .collect();

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
        Ok(self.lock()?.get(&(collection, id.clone())).cloned())
    }

    fn replace(&self, collection: Collection, document: &StoredDocument) -> Result<(), AppError> {
        let mut documents = self.lock()?;
        match documents.get_mut(&(collection, document.id.clone())) {
            Some(existing) => {
                *existing = document.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "Document {} not found in {}",
                document.id, collection
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::store_contract;

    #[test]
    fn insert_then_find_by_id() {
        store_contract::insert_then_find_by_id(&MemoryDocumentStore::new());
    }

    #[test]
    fn find_by_user_is_newest_first_and_limited() {
        store_contract::find_by_user_is_newest_first_and_limited(&MemoryDocumentStore::new());
    }

    #[test]
    fn collections_are_isolated() {
        store_contract::collections_are_isolated(&MemoryDocumentStore::new());
    }

    #[test]
    fn replace_requires_existing_document() {
        store_contract::replace_requires_existing_document(&MemoryDocumentStore::new());
    }

    #[test]
    fn clones_share_documents() {
        let store = MemoryDocumentStore::new();
        let clone = store.clone();
        let user = UserId::parse("678fe640180fa929cc64f786").unwrap();
        clone.insert(Collection::RoadmapForms, &user, serde_json::json!({})).unwrap();
        assert_eq!(store.count(Collection::RoadmapForms), 1);
    }
}
