pub mod cache;
pub mod controller;
pub mod editor;

pub use crate::cache::InsightCache;
pub use crate::controller::AppController;
pub use crate::editor::{EditBuffer, EditField};
