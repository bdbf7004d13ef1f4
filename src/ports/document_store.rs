//! Document persistence port definition.

use serde_json::Value;

use crate::domain::{AppError, Collection, ObjectId, StoredDocument, UserId};

/// Port for storing and reading user-owned JSON documents.
pub trait DocumentStore {
    /// Insert a new document, assigning its id and creation time.
    fn insert(
        &self,
        collection: Collection,
        user_id: &UserId,
        body: Value,
    ) -> Result<StoredDocument, AppError>;

    /// Documents owned by `user_id`, newest first, at most `limit` of them.
    fn find_by_user(
        &self,
        collection: Collection,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<StoredDocument>, AppError>;

    fn find_by_id(
        &self,
        collection: Collection,
        id: &ObjectId,
    ) -> Result<Option<StoredDocument>, AppError>;

    /// Overwrite an existing document. Fails with `NotFound` when absent.
    fn replace(&self, collection: Collection, document: &StoredDocument) -> Result<(), AppError>;
}
