use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub article_id: Uuid,
    pub user_id: String,
    pub created_at: NaiveDateTime,
}

impl Like {
    pub fn new(article_id: Uuid, user_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            article_id,
            user_id,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another row already holds this (article_id, user_id) pair. This is the
    /// race signal the toggle service absorbs; it must stay distinguishable
    /// from every other failure.
    #[error("unique constraint violation on (article_id, user_id)")]
    UniqueViolation,
    #[error("unexpected storage failure")]
    Unexpected,
}

/// Persistence seam for likes. The store owns the uniqueness constraint on
/// (article_id, user_id); no caller holds an application-level lock.
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn find(&self, article_id: Uuid, user_id: &str) -> Result<Option<Like>, StoreError>;
    async fn insert(&self, like: Like) -> Result<(), StoreError>;
    /// Returns false when the row was already gone.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn list_for_article(&self, article_id: Uuid) -> Result<Vec<Like>, StoreError>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Like>, StoreError>;
    async fn delete_batch(&self, ids: Vec<Uuid>) -> Result<u64, StoreError>;
    async fn count_for_article(&self, article_id: Uuid) -> Result<i64, StoreError>;
}

pub struct PgLikeStore {
    pool: PgPool,
}

impl PgLikeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStore for PgLikeStore {
    async fn find(&self, article_id: Uuid, user_id: &str) -> Result<Option<Like>, StoreError> {
        sqlx::query_as::<_, Like>(
            "SELECT id, article_id, user_id, created_at FROM likes WHERE article_id = $1 AND user_id = $2",
        )
        .bind(article_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch like for article {}: {}", article_id, err);
            StoreError::Unexpected
        })
    }

    async fn insert(&self, like: Like) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO likes (id, article_id, user_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(like.id)
        .bind(like.article_id)
        .bind(like.user_id)
        .bind(like.created_at)
        .execute(&self.pool)
        .await
        .map(|_| ())
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::UniqueViolation
            }
            err => {
                tracing::error!("Failed to insert like for article {}: {}", like.article_id, err);
                StoreError::Unexpected
            }
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(|err| {
                tracing::error!("Failed to delete like {}: {}", id, err);
                StoreError::Unexpected
            })
    }

    async fn list_for_article(&self, article_id: Uuid) -> Result<Vec<Like>, StoreError> {
        sqlx::query_as::<_, Like>(
            "SELECT id, article_id, user_id, created_at FROM likes WHERE article_id = $1",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to list likes for article {}: {}", article_id, err);
            StoreError::Unexpected
        })
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Like>, StoreError> {
        sqlx::query_as::<_, Like>(
            "SELECT id, article_id, user_id, created_at FROM likes WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to list likes for user {}: {}", user_id, err);
            StoreError::Unexpected
        })
    }

    async fn delete_batch(&self, ids: Vec<Uuid>) -> Result<u64, StoreError> {
        sqlx::query("DELETE FROM likes WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(|err| {
                tracing::error!("Failed to delete batch of {} likes: {}", ids.len(), err);
                StoreError::Unexpected
            })
    }

    async fn count_for_article(&self, article_id: Uuid) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE article_id = $1")
            .bind(article_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Failed to count likes for article {}: {}", article_id, err);
                StoreError::Unexpected
            })
    }
}

/// In-memory store for development and tests. Enforces the same pair
/// uniqueness as the database constraint, inside its own lock.
#[derive(Default)]
pub struct MemoryLikeStore {
    rows: Mutex<Vec<Like>>,
}

impl MemoryLikeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeStore for MemoryLikeStore {
    async fn find(&self, article_id: Uuid, user_id: &str) -> Result<Option<Like>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .find(|like| like.article_id == article_id && like.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, like: Like) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        if rows
            .iter()
            .any(|existing| existing.article_id == like.article_id && existing.user_id == like.user_id)
        {
            return Err(StoreError::UniqueViolation);
        }
        rows.push(like);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut rows = self.rows.lock().await;
        match rows.iter().position(|like| like.id == id) {
            Some(index) => {
                rows.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_for_article(&self, article_id: Uuid) -> Result<Vec<Like>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|like| like.article_id == article_id)
            .cloned()
            .collect())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Like>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|like| like.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_batch(&self, ids: Vec<Uuid>) -> Result<u64, StoreError> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|like| !ids.contains(&like.id));
        Ok((before - rows.len()) as u64)
    }

    async fn count_for_article(&self, article_id: Uuid) -> Result<i64, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|like| like.article_id == article_id)
            .count() as i64)
    }
}
