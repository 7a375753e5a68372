use sqlx::{Row, SqlitePool};

use crate::error::AppResult;

/// Flat per-user watchlist. Append and list, nothing else.
#[derive(Clone)]
pub struct CollectionStore {
    pool: SqlitePool,
}

impl CollectionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Adds a title to the user's collection; re-adding is a no-op
    pub async fn add_title(&self, user_id: &str, title_id: i64) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO user_collections (user_id, title_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(title_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists the user's collected title ids, ascending
    pub async fn list_titles(&self, user_id: &str) -> AppResult<Vec<i64>> {
        let rows =
            sqlx::query("SELECT title_id FROM user_collections WHERE user_id = ? ORDER BY title_id")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|row| row.get("title_id")).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::init_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_store() -> CollectionStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        CollectionStore::new(pool)
    }

    #[tokio::test]
    async fn test_add_and_list_titles() {
        let store = test_store().await;

        store.add_title("alice", 300).await.unwrap();
        store.add_title("alice", 100).await.unwrap();
        store.add_title("bob", 200).await.unwrap();

        assert_eq!(store.list_titles("alice").await.unwrap(), vec![100, 300]);
        assert_eq!(store.list_titles("bob").await.unwrap(), vec![200]);
    }

    #[tokio::test]
    async fn test_re_adding_title_is_idempotent() {
        let store = test_store().await;

        store.add_title("alice", 100).await.unwrap();
        store.add_title("alice", 100).await.unwrap();

        assert_eq!(store.list_titles("alice").await.unwrap(), vec![100]);
    }

    #[tokio::test]
    async fn test_unknown_user_has_empty_collection() {
        let store = test_store().await;
        assert!(store.list_titles("nobody").await.unwrap().is_empty());
    }
}
