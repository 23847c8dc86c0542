//! The grant workflow.

use std::sync::Arc;

use uuid::Uuid;

use super::engine::PermissionEngine;
use super::error::AccessError;
use super::store::{DocumentStore, GrantStore};
use crate::models::{Grant, Permission};

/// Grants permissions on documents, idempotently.
#[derive(Clone)]
pub struct GrantService {
    documents: Arc<dyn DocumentStore>,
    grants: Arc<dyn GrantStore>,
    engine: PermissionEngine,
}

impl GrantService {
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

    /// Grants `permission` on a document to `username`.
    ///
    /// Granting an already-held permission succeeds without inserting a
    /// second row. The checks run in a fixed order: document existence,
    /// then the caller's grant eligibility, then the idempotence check.
    /// An unauthorized caller is turned away before the grant store is
    /// consulted about the target triple, so the Forbidden response never
    /// reveals whether the grant already exists.
    pub async fn grant(
        &self,
        document_id: Uuid,
        identity: &str,
        username: &str,
        permission: Permission,
    ) -> Result<(), AccessError> {
        if self.documents.find_by_id(document_id).await?.is_none() {
            return Err(AccessError::NotFound(document_id));
        }

        if !self.engine.can_grant(document_id, identity).await? {
            return Err(AccessError::Forbidden(
                "You don't have permission to grant access",
            ));
        }

        if self
            .grants
            .exists(document_id, username, permission)
            .await?
        {
            return Ok(());
        }

        let grant = Grant::new(document_id, username, permission);
        self.grants.insert(&grant).await?;

        tracing::info!(
            "Granted {} on document {} to {}",
            permission.as_str(),
            document_id,
            username
        );
        Ok(())
    }
}
