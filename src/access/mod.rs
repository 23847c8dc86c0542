//! Access-control core: permission decisions and the workflows gated by
//! them. Identity is always an explicit parameter; nothing here reads
//! ambient state.

pub mod documents;
pub mod engine;
pub mod error;
pub mod grants;
pub mod store;
#[cfg(test)]
pub mod testing;

pub use documents::DocumentService;
pub use engine::{is_admin, PermissionEngine, ADMIN};
pub use error::AccessError;
pub use grants::GrantService;
pub use store::{DocumentStore, GrantStore};
