mod document;
mod grant;
mod permission;

pub use document::Document;
pub use grant::Grant;
pub use permission::Permission;
