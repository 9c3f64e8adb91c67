//! The session and state-synchronization controller.
//!
//! One owned container holds every piece of mutable client state: the
//! session store, the insight cache, the single-slot edit buffer and the
//! active view. All state changes go through the operations below, each
//! driven by a discrete user action and at most one remote round trip.
//!
//! Consistency rules:
//! - The cache only changes as a result of a confirmed server response;
//!   every successful mutation ends in a full `refresh()`.
//! - A failed operation leaves all state exactly as it was before the
//!   attempt, with one exception: a rejected credential on a private call
//!   tears the session down and forces the login view.
//! - No operation retries automatically.

use ihub_core::error::{IhubError, Result};
use ihub_core::insight::InsightDraft;
use ihub_core::service::InsightService;
use ihub_core::session::SessionStore;
use ihub_core::user::UserProfile;
use ihub_core::view::ViewState;

use crate::cache::InsightCache;
use crate::editor::{EditBuffer, EditField};

/// Owned state container driving the client.
pub struct AppController<S: SessionStore, A: InsightService> {
    session: S,
    api: A,
    cache: InsightCache,
    editor: Option<EditBuffer>,
    view: ViewState,
}

impl<S: SessionStore, A: InsightService> AppController<S, A> {
    /// Builds the controller and picks the initial view from token
    /// presence: dashboard when a persisted session exists, login
    /// otherwise. The cache starts empty either way; callers populate it
    /// with `refresh()`.
    pub async fn new(session: S, api: A) -> Self {
        let view = if session.current_token().await.is_some() {
            ViewState::Dashboard
        } else {
            ViewState::Login
        };
        Self {
            session,
            api,
            cache: InsightCache::new(),
            editor: None,
            view,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn cache(&self) -> &InsightCache {
        &self.cache
    }

    pub fn editor(&self) -> Option<&EditBuffer> {
        self.editor.as_ref()
    }

    /// Returns the active token or an Auth error when no session exists.
    async fn require_token(&self) -> Result<String> {
        self.session
            .current_token()
            .await
            .ok_or_else(|| IhubError::auth("no active session"))
    }

    /// Post-processes a failed private call. A rejected credential tears
    /// the session down; every other failure passes through with all
    /// state untouched.
    async fn fail(&mut self, err: IhubError) -> IhubError {
        if err.is_auth() {
            tracing::warn!("Credential rejected by the service; forcing login view");
            if let Err(clear_err) = self.session.clear_token().await {
                tracing::warn!("Failed to clear rejected token: {}", clear_err);
            }
            self.cache.clear();
            self.editor = None;
            self.view = ViewState::Login;
        }
        err
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Exchanges credentials for a session. On success the token is
    /// persisted, the view becomes the dashboard and the cache is filled
    /// from a fresh list fetch. On failure nothing changes.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let token = self.api.login(email, password).await?;
        self.session.set_token(token).await?;
        self.view = ViewState::Dashboard;
        tracing::info!("Login succeeded; entering dashboard");
        self.refresh().await
    }

    /// Creates an account. Success returns to the login view; it never
    /// creates a session. Failure is reported in place. Rejected while a
    /// session is live, so the view cannot claim logged-out state with a
    /// token still set.
    pub async fn register(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        if self.session.current_token().await.is_some() {
            return Err(IhubError::validation(
                "already signed in; log out before registering a new account",
            ));
        }
        let profile = self.api.register(email, password).await?;
        self.view = ViewState::Login;
        tracing::info!("Registration succeeded; returning to login");
        Ok(profile)
    }

    /// Ends the session: token cleared, cache discarded, any open edit
    /// dropped. Reachable from every authenticated view.
    pub async fn logout(&mut self) -> Result<()> {
        self.session.clear_token().await?;
        self.cache.clear();
        self.editor = None;
        self.view = ViewState::Login;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Returns the profile of the logged-in user.
    pub async fn whoami(&mut self) -> Result<UserProfile> {
        let token = self.require_token().await?;
        match self.api.me(&token).await {
            Ok(profile) => Ok(profile),
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Explicit navigation from the login screen to registration.
    pub fn show_register(&mut self) {
        if matches!(self.view, ViewState::Login) {
            self.view = ViewState::Register;
        } else {
            tracing::warn!(view = self.view.name(), "Ignoring register navigation");
        }
    }

    /// Explicit navigation from the registration screen back to login.
    pub fn show_login(&mut self) {
        if matches!(self.view, ViewState::Register) {
            self.view = ViewState::Login;
        } else {
            tracing::warn!(view = self.view.name(), "Ignoring login navigation");
        }
    }

    // ========================================================================
    // Cache synchronization
    // ========================================================================

    /// Replaces the cache atomically with a fresh list response, or
    /// leaves it untouched and reports the error.
    pub async fn refresh(&mut self) -> Result<()> {
        let token = self.require_token().await?;
        match self.api.list(&token).await {
            Ok(insights) => {
                tracing::debug!(count = insights.len(), "Cache refreshed");
                self.cache.replace(insights);
                Ok(())
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Creates an insight, then re-derives the cache from a fresh list.
    /// On failure the cache is untouched; the caller keeps the draft so
    /// the form state survives for a retry.
    pub async fn create_insight(&mut self, draft: &InsightDraft) -> Result<()> {
        let token = self.require_token().await?;
        match self.api.create(&token, draft).await {
            Ok(created) => {
                tracing::info!(id = created.id, "Insight created");
                self.refresh().await
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Deletes an insight, then refreshes. A repeat delete of an
    /// already-removed id surfaces `NotFound`; the next refresh is
    /// authoritative either way.
    pub async fn delete_insight(&mut self, id: i64) -> Result<()> {
        let token = self.require_token().await?;
        match self.api.delete(&token, id).await {
            Ok(()) => {
                tracing::info!(id, "Insight deleted");
                self.refresh().await
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Opens the edit buffer as a copy of a cached insight. Rejected when
    /// a buffer is already open: at most one edit at a time, enforced
    /// here rather than by caller discipline.
    pub fn begin_edit(&mut self, id: i64) -> Result<()> {
        if self.editor.is_some() {
            return Err(IhubError::validation(
                "an edit is already in progress; save or cancel it first",
            ));
        }
        let insight = self
            .cache
            .get(id)
            .ok_or_else(|| IhubError::not_found("insight", id.to_string()))?;
        self.editor = Some(EditBuffer::from_insight(insight));
        Ok(())
    }

    /// Mutates one field of the open buffer. The cache is untouched.
    pub fn edit_field(&mut self, field: EditField, value: impl Into<String>) -> Result<()> {
        let buffer = self
            .editor
            .as_mut()
            .ok_or_else(|| IhubError::validation("no edit in progress"))?;
        buffer.set(field, value);
        Ok(())
    }

    /// Commits the open buffer. On success the buffer closes and the
    /// cache is refreshed from the server (never from the buffer). On
    /// failure the buffer stays open with its unsaved values.
    pub async fn save_edit(&mut self) -> Result<()> {
        let token = self.require_token().await?;
        let (id, draft) = match &self.editor {
            Some(buffer) => (buffer.insight_id, buffer.draft()),
            None => return Err(IhubError::validation("no edit in progress")),
        };
        match self.api.update(&token, id, &draft).await {
            Ok(_) => {
                tracing::info!(id, "Insight updated");
                self.editor = None;
                self.refresh().await
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Discards the open buffer unconditionally, unsaved edits included.
    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Fetches the clustering and enters the clusters view. On failure
    /// the current view is kept and the error surfaced.
    pub async fn open_clusters(&mut self) -> Result<()> {
        let token = self.require_token().await?;
        match self.api.clusters(&token).await {
            Ok(clusters) => {
                self.view = ViewState::Clusters(clusters);
                Ok(())
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Runs extraction over a saved insight and enters the extract view.
    pub async fn open_extraction(&mut self, id: i64) -> Result<()> {
        let token = self.require_token().await?;
        match self.api.extract(&token, id).await {
            Ok(extraction) => {
                self.view = ViewState::Extract(extraction);
                Ok(())
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Runs extraction over unsaved text and enters the extract view.
    /// Nothing is persisted server-side.
    pub async fn extract_unsaved(&mut self, draft: &InsightDraft) -> Result<()> {
        let token = self.require_token().await?;
        match self.api.extract_raw(&token, draft).await {
            Ok(extraction) => {
                self.view = ViewState::Extract(extraction);
                Ok(())
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Leaves a derived view, discarding its payload. Re-entry requires a
    /// fresh fetch, never a resume from stale data.
    pub fn back_to_dashboard(&mut self) {
        if matches!(self.view, ViewState::Clusters(_) | ViewState::Extract(_)) {
            self.view = ViewState::Dashboard;
        }
    }
}
