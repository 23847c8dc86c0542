use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::grant::Grant;

/// A stored document and its access grants.
///
/// Content is immutable once created; there is no update operation. The
/// creator gets no implicit permission, so `grants` starts empty even for
/// the admin who created the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    pub file_type: String,
    pub created_by: String,
    pub grants: Vec<Grant>,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        file_type: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content: content.into(),
            file_type: file_type.into(),
            created_by: created_by.into(),
            grants: Vec::new(),
        }
    }
}
