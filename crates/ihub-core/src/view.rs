//! View state machine types.
//!
//! The active screen and its payload live in one enum so that the derived
//! views (`Clusters`, `Extract`) are unrepresentable without the data they
//! render. Leaving a derived view drops the payload; re-entering requires
//! a fresh fetch.

use crate::analysis::{Cluster, Extraction};

/// Which screen is active, carrying any per-view payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Credential entry; the only reachable views without a session are
    /// this and `Register`.
    Login,
    /// Account creation. A successful registration returns to `Login`;
    /// it never creates a session.
    Register,
    /// The insight list and create form.
    Dashboard,
    /// Cross-insight clustering results, as last fetched.
    Clusters(Vec<Cluster>),
    /// Extraction results for a single text, as last fetched.
    Extract(Extraction),
}

impl ViewState {
    /// Short stable name for logging and prompts.
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Login => "login",
            ViewState::Register => "register",
            ViewState::Dashboard => "dashboard",
            ViewState::Clusters(_) => "clusters",
            ViewState::Extract(_) => "extract",
        }
    }

    /// Whether this view is only reachable with an active session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, ViewState::Login | ViewState::Register)
    }
}
