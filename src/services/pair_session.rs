use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    db::SessionStore,
    error::{AppError, AppResult},
    models::{MatchOutcome, PairSession, TitleRecord},
    services::providers::CatalogProvider,
};

/// The pair-session matchmaking engine.
///
/// Holds no session state of its own; every operation is a transformation over
/// the store, plus a read-only candidate fetch from the catalog. The one piece
/// of in-process state is the per-session lock registry that serializes
/// `next_candidate`'s read-filter-append sequence.
pub struct PairSessionService {
    store: SessionStore,
    catalog: Arc<dyn CatalogProvider>,
    /// Fixed reference year for genre-based candidate searches
    search_year: i32,
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl PairSessionService {
    pub fn new(store: SessionStore, catalog: Arc<dyn CatalogProvider>, search_year: i32) -> Self {
        Self {
            store,
            catalog,
            search_year,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a session pairing the two participants
    pub async fn create_session(&self, user_a: String, user_b: String) -> AppResult<PairSession> {
        let session = PairSession::new(user_a, user_b);
        self.store.create_session(&session).await?;

        tracing::info!(
            session_id = %session.session_id,
            user_a = %session.user_a,
            user_b = %session.user_b,
            "Pair session created"
        );

        Ok(session)
    }

    /// Replaces the participant's genre selection for this session.
    ///
    /// The new set fully supersedes the old one; submitting twice with the
    /// same genres is a no-op.
    pub async fn set_genres(
        &self,
        session_id: Uuid,
        user_id: &str,
        genres: BTreeSet<String>,
    ) -> AppResult<()> {
        self.require_session(session_id).await?;
        self.store.replace_genres(session_id, user_id, &genres).await?;

        tracing::info!(
            session_id = %session_id,
            user_id = %user_id,
            genre_count = genres.len(),
            "Genre selection replaced"
        );

        Ok(())
    }

    /// Selects the next candidate title the pair has not seen yet.
    ///
    /// Candidates come from one catalog query per common genre (in
    /// lexicographic genre order, at the configured search year), or from a
    /// single random-movie query when the participants share no genre. The
    /// first candidate not already in the shown set is recorded as shown and
    /// returned.
    ///
    /// The whole read-filter-append sequence runs under this session's lock;
    /// concurrent calls for the same session cannot hand out the same title.
    /// Failure paths mutate nothing.
    pub async fn next_candidate(&self, session_id: Uuid) -> AppResult<TitleRecord> {
        let lock = self.session_lock(session_id).await;
        let _guard = lock.lock().await;

        let shown = self.store.get_shown(session_id).await?;

        let genres = self.store.get_genres(session_id).await?;
        if genres.is_empty() {
            return Err(AppError::PreconditionFailed("no genres selected".to_string()));
        }

        let (user_a, user_b) = self.require_session(session_id).await?;

        let empty = BTreeSet::new();
        let genres_a = genres.get(&user_a).unwrap_or(&empty);
        let genres_b = genres.get(&user_b).unwrap_or(&empty);
        let common: Vec<&String> = genres_a.intersection(genres_b).collect();

        let mut candidates = Vec::new();
        if common.is_empty() {
            candidates = self.catalog.random_movie().await?;
        } else {
            for genre in &common {
                let batch = self
                    .catalog
                    .by_genre_and_year(genre.as_str(), self.search_year)
                    .await?;
                candidates.extend(batch);
            }
        }

        let candidate = candidates
            .into_iter()
            .find(|title| !shown.contains(&title.id))
            .ok_or(AppError::NoCandidates)?;

        self.store.append_shown(session_id, candidate.id).await?;

        tracing::info!(
            session_id = %session_id,
            title_id = candidate.id,
            common_genres = common.len(),
            "Candidate selected"
        );

        Ok(candidate)
    }

    /// Records a like/dislike and reports whether the pair now has a match.
    ///
    /// The match set is re-derived from all persisted votes on every call, so
    /// the outcome does not depend on vote arrival order. When several titles
    /// are matched at once, the smallest title id is reported.
    pub async fn cast_vote(
        &self,
        session_id: Uuid,
        user_id: &str,
        title_id: i64,
        liked: bool,
    ) -> AppResult<MatchOutcome> {
        let (user_a, user_b) = self.require_session(session_id).await?;

        self.store.upsert_vote(session_id, user_id, title_id, liked).await?;

        let votes = self.store.get_votes(session_id).await?;
        let matched = matched_titles(&votes, &user_a, &user_b);

        let outcome = match matched.first() {
            Some(&title_id) => {
                tracing::info!(
                    session_id = %session_id,
                    title_id = title_id,
                    "Pair matched on a title"
                );
                MatchOutcome::matched(title_id)
            }
            None => MatchOutcome::no_match(),
        };

        Ok(outcome)
    }

    /// All titles both participants have liked, ascending by title id
    pub async fn matches(&self, session_id: Uuid) -> AppResult<Vec<i64>> {
        let (user_a, user_b) = self.require_session(session_id).await?;
        let votes = self.store.get_votes(session_id).await?;
        Ok(matched_titles(&votes, &user_a, &user_b))
    }

    /// Resolves the participants, or fails with `SessionNotFound`
    async fn require_session(&self, session_id: Uuid) -> AppResult<(String, String)> {
        self.store
            .get_session_users(session_id)
            .await?
            .ok_or(AppError::SessionNotFound(session_id))
    }

    /// Fetches or creates the lock serializing candidate selection for a session
    async fn session_lock(&self, session_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Titles both participants have a stored "like" for, ascending by id.
///
/// Only the latest vote per (user, title) exists in the store, so an
/// overwritten like counts at its current value.
fn matched_titles(
    votes: &HashMap<String, HashMap<i64, bool>>,
    user_a: &str,
    user_b: &str,
) -> Vec<i64> {
    let empty = HashMap::new();
    let votes_a = votes.get(user_a).unwrap_or(&empty);
    let votes_b = votes.get(user_b).unwrap_or(&empty);

    let mut matched: Vec<i64> = votes_a
        .iter()
        .filter(|(title_id, liked)| **liked && votes_b.get(title_id) == Some(&true))
        .map(|(title_id, _)| *title_id)
        .collect();
    matched.sort_unstable();
    matched
}
