use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::access::GrantStore;
use crate::models::{Grant, Permission};

pub struct SqliteGrantStore {
    pool: SqlitePool,
}

impl SqliteGrantStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GrantStore for SqliteGrantStore {
    async fn exists(
        &self,
        document_id: Uuid,
        username: &str,
        permission: Permission,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM document_grants
            WHERE document_id = ? AND username = ? AND permission = ?
            "#,
        )
        .bind(document_id.to_string())
        .bind(username)
        .bind(permission.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn insert(&self, grant: &Grant) -> Result<(), sqlx::Error> {
        // A concurrent insert of the same triple loses the race silently;
        // the caller cannot tell it apart from its own idempotence check.
        sqlx::query(
            r#"
            INSERT INTO document_grants (id, document_id, username, permission)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (document_id, username, permission) DO NOTHING
            "#,
        )
        .bind(grant.id.to_string())
        .bind(grant.document_id.to_string())
        .bind(&grant.username)
        .bind(grant.permission.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_matching_among(
        &self,
        candidate_ids: &[Uuid],
        username: &str,
        permission: Permission,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        if candidate_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT DISTINCT document_id FROM document_grants WHERE username = ",
        );
        query.push_bind(username);
        query.push(" AND permission = ");
        query.push_bind(permission.as_str());
        query.push(" AND document_id IN (");
        let mut ids = query.separated(", ");
        for id in candidate_ids {
            ids.push_bind(id.to_string());
        }
        query.push(")");

        let matched: Vec<String> = query.build_query_scalar().fetch_all(&self.pool).await?;

        Ok(matched
            .into_iter()
            .map(|id| Uuid::parse_str(&id).unwrap())
            .collect())
    }
}
