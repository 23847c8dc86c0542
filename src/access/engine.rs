//! Permission decision logic.

use std::sync::Arc;

use uuid::Uuid;

use super::store::GrantStore;
use crate::models::Permission;

/// The distinguished super-identity.
pub const ADMIN: &str = "admin";

/// Returns true iff `identity` is the admin super-identity.
pub fn is_admin(identity: &str) -> bool {
    identity == ADMIN
}

/// Answers permission checks against the grant store.
///
/// Stateless; every check is evaluated fresh, so any number of checks may
/// run concurrently.
#[derive(Clone)]
pub struct PermissionEngine {
    grants: Arc<dyn GrantStore>,
}

impl PermissionEngine {
    pub fn new(grants: Arc<dyn GrantStore>) -> Self {
        Self { grants }
    }

    /// True if `identity` holds `permission` on the document.
    ///
    /// Admin passes without a store lookup. Document existence is not
    /// verified here; callers resolve the document first.
    pub async fn has_permission(
        &self,
        document_id: Uuid,
        identity: &str,
        permission: Permission,
    ) -> Result<bool, sqlx::Error> {
        if is_admin(identity) {
            return Ok(true);
        }

        self.grants.exists(document_id, identity, permission).await
    }

    /// True if `identity` may grant access on the document: admin, or the
    /// holder of a WRITE grant.
    pub async fn can_grant(&self, document_id: Uuid, identity: &str) -> Result<bool, sqlx::Error> {
        if is_admin(identity) {
            return Ok(true);
        }

        self.has_permission(document_id, identity, Permission::Write)
            .await
    }
}
