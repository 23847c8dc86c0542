//! Store contracts the access-control core depends on.
//!
//! The engine and workflows only ever touch storage through these two
//! traits. The SQLite implementations live in `crate::db`; the in-memory
//! doubles used by the workflow tests live in `super::testing`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Document, Grant, Permission};

/// Storage for document records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persists a new document and returns the stored record.
    async fn create(&self, document: &Document) -> Result<Document, sqlx::Error>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, sqlx::Error>;

    async fn find_all(&self) -> Result<Vec<Document>, sqlx::Error>;

    /// Documents on which `username` holds a READ grant.
    async fn find_all_readable_by(&self, username: &str) -> Result<Vec<Document>, sqlx::Error>;

    /// Deletes the document together with all of its grants, atomically.
    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error>;
}

/// Storage for grant triples.
#[async_trait]
pub trait GrantStore: Send + Sync {
    /// True iff the exact (document, username, permission) triple is stored.
    async fn exists(
        &self,
        document_id: Uuid,
        username: &str,
        permission: Permission,
    ) -> Result<bool, sqlx::Error>;

    /// Inserts a grant. A duplicate triple is a no-op, never an error.
    async fn insert(&self, grant: &Grant) -> Result<(), sqlx::Error>;

    /// Of `candidate_ids`, the ids covered by a matching grant for `username`.
    async fn find_matching_among(
        &self,
        candidate_ids: &[Uuid],
        username: &str,
        permission: Permission,
    ) -> Result<Vec<Uuid>, sqlx::Error>;
}
