use std::collections::{BTreeSet, HashMap, HashSet};

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::PairSession;

/// Persistence for pair sessions: participants, genre selections, votes, and
/// the shown-title set.
///
/// This layer is pure storage with no policy. Every operation is keyed by
/// session id and atomic with respect to a single call. Reads on unknown
/// sessions return empty results; only `get_session_users` distinguishes a
/// missing session, because the engine needs an existence signal there.
#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persists a freshly created session record
    pub async fn create_session(&self, session: &PairSession) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO pair_sessions (session_id, user_a, user_b, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(session.session_id.to_string())
        .bind(&session.user_a)
        .bind(&session.user_b)
        .bind(session.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns the two participant identifiers, or `None` for an unknown session
    pub async fn get_session_users(&self, session_id: Uuid) -> AppResult<Option<(String, String)>> {
        let row = sqlx::query("SELECT user_a, user_b FROM pair_sessions WHERE session_id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| (row.get("user_a"), row.get("user_b"))))
    }

    /// Replaces the genre set for (session, user) in a single transaction.
    ///
    /// Delete-then-insert inside one transaction: a concurrent reader sees
    /// either the old set or the new set, never a partial mix.
    pub async fn replace_genres(
        &self,
        session_id: Uuid,
        user_id: &str,
        genres: &BTreeSet<String>,
    ) -> AppResult<()> {
        let session_id = session_id.to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM session_genres WHERE session_id = ? AND user_id = ?")
            .bind(&session_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for genre in genres {
            sqlx::query("INSERT INTO session_genres (session_id, user_id, genre) VALUES (?, ?, ?)")
                .bind(&session_id)
                .bind(user_id)
                .bind(genre)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Returns each participant's genre selection; empty map if nobody has submitted
    pub async fn get_genres(&self, session_id: Uuid) -> AppResult<HashMap<String, BTreeSet<String>>> {
        let rows = sqlx::query("SELECT user_id, genre FROM session_genres WHERE session_id = ?")
            .bind(session_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        let mut genres: HashMap<String, BTreeSet<String>> = HashMap::new();
        for row in rows {
            let user_id: String = row.get("user_id");
            let genre: String = row.get("genre");
            genres.entry(user_id).or_default().insert(genre);
        }

        Ok(genres)
    }

    /// Records a vote; a repeat vote on the same (user, title) overwrites
    pub async fn upsert_vote(
        &self,
        session_id: Uuid,
        user_id: &str,
        title_id: i64,
        liked: bool,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO session_votes (session_id, user_id, title_id, liked)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(session_id, user_id, title_id) DO UPDATE SET liked = excluded.liked
            "#,
        )
        .bind(session_id.to_string())
        .bind(user_id)
        .bind(title_id)
        .bind(liked)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns all votes for a session, keyed by user then title
    pub async fn get_votes(
        &self,
        session_id: Uuid,
    ) -> AppResult<HashMap<String, HashMap<i64, bool>>> {
        let rows =
            sqlx::query("SELECT user_id, title_id, liked FROM session_votes WHERE session_id = ?")
                .bind(session_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        let mut votes: HashMap<String, HashMap<i64, bool>> = HashMap::new();
        for row in rows {
            let user_id: String = row.get("user_id");
            let title_id: i64 = row.get("title_id");
            let liked: bool = row.get("liked");
            votes.entry(user_id).or_default().insert(title_id, liked);
        }

        Ok(votes)
    }

    /// Adds a title to the session's shown set.
    ///
    /// `INSERT OR IGNORE` on the (session_id, title_id) primary key: the shown
    /// set is append-only, and a duplicate append is a no-op.
    pub async fn append_shown(&self, session_id: Uuid, title_id: i64) -> AppResult<()> {
        sqlx::query("INSERT OR IGNORE INTO session_shown (session_id, title_id) VALUES (?, ?)")
            .bind(session_id.to_string())
            .bind(title_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns the set of title ids already presented to this session
    pub async fn get_shown(&self, session_id: Uuid) -> AppResult<HashSet<i64>> {
        let rows = sqlx::query("SELECT title_id FROM session_shown WHERE session_id = ?")
            .bind(session_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.get("title_id")).collect())
    }
}
