pub mod collection;
pub mod pair_session;
pub mod providers;

pub use pair_session::PairSessionService;
