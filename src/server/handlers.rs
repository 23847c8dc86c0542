//! Request handlers for the document API.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ApiError;
use super::identity::Identity;
use super::AppState;
use crate::models::{Document, Permission};

/// A (username, permission) pair as it appears on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessEntry {
    pub username: String,
    pub permission: Permission,
}

#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    file_type: String,
    /// Accepted for compatibility with existing clients, never persisted:
    /// new documents start with zero grants and access is added through
    /// the grant endpoint.
    #[serde(default)]
    #[allow(dead_code)]
    accessible_users: Vec<AccessEntry>,
}

impl CreateDocumentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = HashMap::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "must not be blank".to_string());
        }
        if self.content.trim().is_empty() {
            errors.insert("content".to_string(), "must not be blank".to_string());
        }
        if self.file_type.trim().is_empty() {
            errors.insert("file_type".to_string(), "must not be blank".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(errors))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GrantRequest {
    #[serde(default)]
    username: String,
    permission: Option<Permission>,
}

impl GrantRequest {
    fn validate(&self) -> Result<Permission, ApiError> {
        let mut errors = HashMap::new();
        if self.username.trim().is_empty() {
            errors.insert("username".to_string(), "Username is required".to_string());
        }
        match self.permission {
            Some(permission) if errors.is_empty() => Ok(permission),
            _ => {
                if self.permission.is_none() {
                    errors.insert(
                        "permission".to_string(),
                        "Permission is required".to_string(),
                    );
                }
                Err(ApiError::validation(errors))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchAccessRequest {
    permission: Option<Permission>,
    #[serde(default)]
    document_ids: Vec<Uuid>,
}

impl BatchAccessRequest {
    fn validate(&self) -> Result<Permission, ApiError> {
        let mut errors = HashMap::new();
        if self.document_ids.is_empty() {
            errors.insert(
                "document_ids".to_string(),
                "Document IDs cannot be empty".to_string(),
            );
        }
        match self.permission {
            Some(permission) if errors.is_empty() => Ok(permission),
            _ => {
                if self.permission.is_none() {
                    errors.insert(
                        "permission".to_string(),
                        "Permission is required".to_string(),
                    );
                }
                Err(ApiError::validation(errors))
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    pub file_type: String,
    pub accessible_users: Vec<AccessEntry>,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            name: document.name,
            content: document.content,
            file_type: document.file_type,
            accessible_users: document
                .grants
                .into_iter()
                .map(|g| AccessEntry {
                    username: g.username,
                    permission: g.permission,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchAccessResponse {
    pub accessible_ids: Vec<Uuid>,
}

pub async fn create_document(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), ApiError> {
    request.validate()?;

    let document = Document::new(
        request.name,
        request.content,
        request.file_type,
        identity.0.as_str(),
    );
    let created = state.documents.create(&identity.0, document).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn list_documents(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<DocumentResponse>>, ApiError> {
    let documents = state.documents.list(&identity.0).await?;
    Ok(Json(documents.into_iter().map(Into::into).collect()))
}

pub async fn get_document(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let document = state.documents.get(id, &identity.0).await?;
    Ok(Json(document.into()))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.documents.delete(id, &identity.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn grant_permission(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(request): Json<GrantRequest>,
) -> Result<StatusCode, ApiError> {
    let permission = request.validate()?;
    state
        .grants
        .grant(id, &identity.0, &request.username, permission)
        .await?;
    Ok(StatusCode::OK)
}

pub async fn batch_access_check(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<BatchAccessRequest>,
) -> Result<Json<BatchAccessResponse>, ApiError> {
    let permission = request.validate()?;
    let accessible_ids = state
        .documents
        .batch_check(&identity.0, permission, &request.document_ids)
        .await?;
    Ok(Json(BatchAccessResponse { accessible_ids }))
}
