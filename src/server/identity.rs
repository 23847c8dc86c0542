//! Caller identity extraction.
//!
//! The server trusts an upstream gateway to authenticate callers and pass
//! the resulting username in the `X-User` header. The header value is used
//! as the identity string as-is; `"admin"` is the super-identity.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Header carrying the caller's username.
pub const USER_HEADER: &str = "x-user";

/// The resolved caller identity, added to request extensions.
#[derive(Debug, Clone)]
pub struct Identity(pub String);

/// Identity error response
#[derive(Serialize)]
struct IdentityError {
    error: &'static str,
    message: &'static str,
}

/// Rejects requests without a usable `X-User` header.
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    let username = request
        .headers()
        .get(USER_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|u| !u.trim().is_empty());

    match username {
        Some(username) => {
            let identity = Identity(username.to_string());
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(IdentityError {
                error: "missing_identity",
                message: "Missing X-User header",
            }),
        )
            .into_response(),
    }
}
