use serde::{Deserialize, Serialize};

/// Permission levels that can be granted on a document.
///
/// `Write` does not gate any content change (documents are immutable once
/// created); holding it makes an identity eligible to grant access to others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
    Read,
    Write,
    Delete,
}

impl Permission {
    /// Returns the string form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "READ",
            Permission::Write => "WRITE",
            Permission::Delete => "DELETE",
        }
    }

    /// Parse from the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "READ" => Some(Permission::Read),
            "WRITE" => Some(Permission::Write),
            "DELETE" => Some(Permission::Delete),
            _ => None,
        }
    }
}
