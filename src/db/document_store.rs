use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::access::DocumentStore;
use crate::models::{Document, Grant, Permission};

pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

// Row types for database queries
#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    name: String,
    content: String,
    file_type: String,
    created_by: String,
}

#[derive(sqlx::FromRow)]
struct GrantRow {
    id: String,
    document_id: String,
    username: String,
    permission: String,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn hydrate_document(&self, row: DocumentRow) -> Result<Document, sqlx::Error> {
        let grants: Vec<GrantRow> = sqlx::query_as(
            "SELECT id, document_id, username, permission FROM document_grants WHERE document_id = ?",
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Document {
            id: Uuid::parse_str(&row.id).unwrap(),
            name: row.name,
            content: row.content,
            file_type: row.file_type,
            created_by: row.created_by,
            grants: grants
                .into_iter()
                .map(|g| Grant {
                    id: Uuid::parse_str(&g.id).unwrap(),
                    document_id: Uuid::parse_str(&g.document_id).unwrap(),
                    username: g.username,
                    permission: Permission::parse(&g.permission).unwrap(),
                })
                .collect(),
        })
    }

    async fn hydrate_all(&self, rows: Vec<DocumentRow>) -> Result<Vec<Document>, sqlx::Error> {
        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            documents.push(self.hydrate_document(row).await?);
        }
        Ok(documents)
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create(&self, document: &Document) -> Result<Document, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO documents (id, name, content, file_type, created_by)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(document.id.to_string())
        .bind(&document.name)
        .bind(&document.content)
        .bind(&document.file_type)
        .bind(&document.created_by)
        .execute(&self.pool)
        .await?;

        self.find_by_id(document.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, sqlx::Error> {
        let row: Option<DocumentRow> = sqlx::query_as("SELECT * FROM documents WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => self.hydrate_document(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Document>, sqlx::Error> {
        let rows: Vec<DocumentRow> = sqlx::query_as("SELECT * FROM documents ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        self.hydrate_all(rows).await
    }

    async fn find_all_readable_by(&self, username: &str) -> Result<Vec<Document>, sqlx::Error> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT DISTINCT d.* FROM documents d
            JOIN document_grants g ON g.document_id = d.id
            WHERE g.username = ? AND g.permission = ?
            ORDER BY d.name
            "#,
        )
        .bind(username)
        .bind(Permission::Read.as_str())
        .fetch_all(&self.pool)
        .await?;

        self.hydrate_all(rows).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let id_str = id.to_string();
        let mut tx = self.pool.begin().await?;

        // Grants and the document go in one transaction; a reader sees
        // both or neither.
        sqlx::query("DELETE FROM document_grants WHERE document_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::GrantStore;
    use crate::db::{init_db, SqliteGrantStore};
    use tempfile::TempDir;

    struct TestContext {
        documents: SqliteDocumentStore,
        grants: SqliteGrantStore,
        _temp_dir: TempDir, // Keep alive for duration of test
    }

    async fn setup() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = init_db(&db_path).await.unwrap();
        TestContext {
            documents: SqliteDocumentStore::new(pool.clone()),
            grants: SqliteGrantStore::new(pool),
            _temp_dir: temp_dir,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_document() {
        let ctx = setup().await;

        let doc = Document::new("report.pdf", "quarterly numbers", "pdf", "admin");
        let created = ctx.documents.create(&doc).await.unwrap();
        assert_eq!(created.name, "report.pdf");
        assert!(created.grants.is_empty());

        let fetched = ctx.documents.find_by_id(doc.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_find_missing_document_returns_none() {
        let ctx = setup().await;
        assert!(ctx
            .documents
            .find_by_id(Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_hydrates_grants() {
        let ctx = setup().await;

        let doc = Document::new("report.pdf", "contents", "pdf", "admin");
        ctx.documents.create(&doc).await.unwrap();
        ctx.grants
            .insert(&Grant::new(doc.id, "user1", Permission::Read))
            .await
            .unwrap();
        ctx.grants
            .insert(&Grant::new(doc.id, "user2", Permission::Delete))
            .await
            .unwrap();

        let fetched = ctx.documents.find_by_id(doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.grants.len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_sorted_by_name() {
        let ctx = setup().await;

        for name in ["c.txt", "a.txt", "b.txt"] {
            ctx.documents
                .create(&Document::new(name, "x", "txt", "admin"))
                .await
                .unwrap();
        }

        let all = ctx.documents.find_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn test_find_all_readable_by_requires_read_grant() {
        let ctx = setup().await;

        let readable = Document::new("readable.txt", "x", "txt", "admin");
        let deletable = Document::new("deletable.txt", "x", "txt", "admin");
        let hidden = Document::new("hidden.txt", "x", "txt", "admin");
        for doc in [&readable, &deletable, &hidden] {
            ctx.documents.create(doc).await.unwrap();
        }
        ctx.grants
            .insert(&Grant::new(readable.id, "user1", Permission::Read))
            .await
            .unwrap();
        ctx.grants
            .insert(&Grant::new(deletable.id, "user1", Permission::Delete))
            .await
            .unwrap();

        let docs = ctx.documents.find_all_readable_by("user1").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, readable.id);

        assert!(ctx
            .documents
            .find_all_readable_by("user2")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_document_and_grants() {
        let ctx = setup().await;

        let doc = Document::new("doomed.txt", "x", "txt", "admin");
        ctx.documents.create(&doc).await.unwrap();
        ctx.grants
            .insert(&Grant::new(doc.id, "user1", Permission::Read))
            .await
            .unwrap();

        ctx.documents.delete(doc.id).await.unwrap();

        assert!(ctx.documents.find_by_id(doc.id).await.unwrap().is_none());
        assert!(!ctx
            .grants
            .exists(doc.id, "user1", Permission::Read)
            .await
            .unwrap());
    }
}
