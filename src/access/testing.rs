//! In-memory, call-counting store doubles for workflow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::store::{DocumentStore, GrantStore};
use crate::models::{Document, Grant, Permission};

pub struct InMemoryDocumentStore {
    documents: Mutex<Vec<Document>>,
    pub find_calls: AtomicUsize,
}

impl InMemoryDocumentStore {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
            find_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, document: &Document) -> Result<Document, sqlx::Error> {
        let mut documents = self.documents.lock().unwrap();
        documents.push(document.clone());
        Ok(document.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, sqlx::Error> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let documents = self.documents.lock().unwrap();
        Ok(documents.iter().find(|d| d.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Document>, sqlx::Error> {
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn find_all_readable_by(&self, username: &str) -> Result<Vec<Document>, sqlx::Error> {
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .filter(|d| {
                d.grants
                    .iter()
                    .any(|g| g.username == username && g.permission == Permission::Read)
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let mut documents = self.documents.lock().unwrap();
        documents.retain(|d| d.id != id);
        Ok(())
    }
}

pub struct InMemoryGrantStore {
    grants: Mutex<Vec<Grant>>,
    pub exists_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub matching_calls: AtomicUsize,
}

impl InMemoryGrantStore {
    pub fn with_grants(grants: Vec<Grant>) -> Self {
        Self {
            grants: Mutex::new(grants),
            exists_calls: AtomicUsize::new(0),
            insert_calls: AtomicUsize::new(0),
            matching_calls: AtomicUsize::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.grants.lock().unwrap().len()
    }
}

#[async_trait]
impl GrantStore for InMemoryGrantStore {
    async fn exists(
        &self,
        document_id: Uuid,
        username: &str,
        permission: Permission,
    ) -> Result<bool, sqlx::Error> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        let grants = self.grants.lock().unwrap();
        Ok(grants.iter().any(|g| {
            g.document_id == document_id && g.username == username && g.permission == permission
        }))
    }

    async fn insert(&self, grant: &Grant) -> Result<(), sqlx::Error> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut grants = self.grants.lock().unwrap();
        let duplicate = grants.iter().any(|g| {
            g.document_id == grant.document_id
                && g.username == grant.username
                && g.permission == grant.permission
        });
        if !duplicate {
            grants.push(grant.clone());
        }
        Ok(())
    }

    async fn find_matching_among(
        &self,
        candidate_ids: &[Uuid],
        username: &str,
        permission: Permission,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        self.matching_calls.fetch_add(1, Ordering::SeqCst);
        let grants = self.grants.lock().unwrap();
        Ok(candidate_ids
            .iter()
            .copied()
            .filter(|id| {
                grants.iter().any(|g| {
                    g.document_id == *id && g.username == username && g.permission == permission
                })
            })
            .collect())
    }
}
