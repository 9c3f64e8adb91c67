//! Insight domain models.
//!
//! An insight is a user-authored note record owned by the remote service.
//! The client only ever holds a read cache of these; the server-computed
//! fields (`summary`, `sentiment`, `keywords`) are never written locally.

use serde::{Deserialize, Serialize};

/// A note record as returned by the remote service.
///
/// `id` is server-assigned and stable. `summary`, `sentiment` and
/// `keywords` are computed server-side on create and are read-only to
/// the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Comma-separated free text, as entered by the user.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl Insight {
    /// Returns the user-editable fields as a draft.
    pub fn to_draft(&self) -> InsightDraft {
        InsightDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// The user-editable fields of an insight, used for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightDraft {
    pub title: String,
    pub content: String,
    pub tags: String,
}

impl InsightDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: tags.into(),
        }
    }
}
