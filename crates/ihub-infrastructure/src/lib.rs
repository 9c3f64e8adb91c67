pub mod config_storage;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use crate::config_storage::ConfigStorage;
pub use crate::session_store::FileSessionStore;
