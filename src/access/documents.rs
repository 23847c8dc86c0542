//! Document authorization workflows.

use std::sync::Arc;

use uuid::Uuid;

use super::engine::{is_admin, PermissionEngine};
use super::error::AccessError;
use super::store::{DocumentStore, GrantStore};
use crate::models::{Document, Permission};

/// Gates document operations through the permission engine.
#[derive(Clone)]
pub struct DocumentService {
    documents: Arc<dyn DocumentStore>,
    grants: Arc<dyn GrantStore>,
    engine: PermissionEngine,
}

impl DocumentService {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        grants: Arc<dyn GrantStore>,
        engine: PermissionEngine,
    ) -> Self {
        Self {
            documents,
            grants,
            engine,
        }
    }

    /// Creates a document. Admin only; the new document starts with zero
    /// grants, so it is invisible to every non-admin identity until access
    /// is granted explicitly.
    pub async fn create(
        &self,
        identity: &str,
        document: Document,
    ) -> Result<Document, AccessError> {
        if !is_admin(identity) {
            return Err(AccessError::Forbidden("Only admin can create documents"));
        }

        let created = self.documents.create(&document).await?;
        tracing::info!("Created document {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Fetches a document by id, requiring READ.
    pub async fn get(&self, id: Uuid, identity: &str) -> Result<Document, AccessError> {
        let document = self
            .documents
            .find_by_id(id)
            .await?
            .ok_or(AccessError::NotFound(id))?;

        if !self
            .engine
            .has_permission(id, identity, Permission::Read)
            .await?
        {
            return Err(AccessError::Forbidden(
                "You don't have READ permission on this document",
            ));
        }

        Ok(document)
    }

    /// Lists the documents visible to `identity`: everything for admin,
    /// READ-granted documents for anyone else.
    pub async fn list(&self, identity: &str) -> Result<Vec<Document>, AccessError> {
        if is_admin(identity) {
            return Ok(self.documents.find_all().await?);
        }

        Ok(self.documents.find_all_readable_by(identity).await?)
    }

    /// Deletes a document and all of its grants, requiring DELETE.
    pub async fn delete(&self, id: Uuid, identity: &str) -> Result<(), AccessError> {
        if self.documents.find_by_id(id).await?.is_none() {
            return Err(AccessError::NotFound(id));
        }

        if !self
            .engine
            .has_permission(id, identity, Permission::Delete)
            .await?
        {
            return Err(AccessError::Forbidden(
                "You don't have DELETE permission on this document",
            ));
        }

        self.documents.delete(id).await?;
        tracing::info!("Deleted document {}", id);
        Ok(())
    }

    /// Filters `candidate_ids` down to the ids `identity` may access with
    /// `permission`.
    ///
    /// Admin gets the candidates back unchanged, without an existence
    /// check, so ids of documents that do not exist pass through. For
    /// everyone else the result is the granted subset in store order; a
    /// missing document and a missing grant are indistinguishable. Callers
    /// must reject an empty candidate set before reaching this method.
    pub async fn batch_check(
        &self,
        identity: &str,
        permission: Permission,
        candidate_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, AccessError> {
        if is_admin(identity) {
            return Ok(candidate_ids.to_vec());
        }

        Ok(self
            .grants
            .find_matching_among(candidate_ids, identity, permission)
            .await?)
    }
}
