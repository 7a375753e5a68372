use crate::{db::CollectionStore, error::AppResult};

/// Service functions for the per-user watchlist
///
/// Pure delegation to the store, maintaining a clean separation between HTTP
/// routing and persistence.
pub async fn add_to_collection(
    store: &CollectionStore,
    user_id: &str,
    title_id: i64,
) -> AppResult<()> {
    store.add_title(user_id, title_id).await
}

pub async fn get_collection(store: &CollectionStore, user_id: &str) -> AppResult<Vec<i64>> {
    store.list_titles(user_id).await
}
