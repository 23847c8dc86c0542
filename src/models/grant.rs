use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::permission::Permission;

/// A single (document, username, permission) authorization.
///
/// The triple is unique in storage; a grant only ever disappears when its
/// document is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grant {
    pub id: Uuid,
    pub document_id: Uuid,
    pub username: String,
    pub permission: Permission,
}

impl Grant {
    pub fn new(document_id: Uuid, username: impl Into<String>, permission: Permission) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            username: username.into(),
            permission,
        }
    }
}
