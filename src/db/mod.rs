pub mod collections;
pub mod session_store;
pub mod sqlite;

pub use collections::CollectionStore;
pub use session_store::SessionStore;
pub use sqlite::{create_pool, init_schema};
