pub mod analysis;
pub mod config;
pub mod error;
pub mod insight;
pub mod service;
pub mod session;
pub mod user;
pub mod view;

// Re-export common error type
pub use error::{IhubError, Result};
