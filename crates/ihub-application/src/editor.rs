//! The transient edit buffer.
//!
//! A detached, field-wise copy of one insight's editable fields. Edits
//! touch the buffer only; the cache is never mutated until the save round
//! trip succeeds and triggers a full refresh.

use std::str::FromStr;

use ihub_core::error::IhubError;
use ihub_core::insight::{Insight, InsightDraft};

/// One of the user-editable fields of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Content,
    Tags,
}

impl FromStr for EditField {
    type Err = IhubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(EditField::Title),
            "content" => Ok(EditField::Content),
            "tags" => Ok(EditField::Tags),
            other => Err(IhubError::validation(format!(
                "unknown field '{}' (expected title, content or tags)",
                other
            ))),
        }
    }
}

/// A working copy of one insight's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub insight_id: i64,
    pub title: String,
    pub content: String,
    pub tags: String,
}

impl EditBuffer {
    /// Opens a buffer as a field-wise copy of the given cached insight.
    pub fn from_insight(insight: &Insight) -> Self {
        Self {
            insight_id: insight.id,
            title: insight.title.clone(),
            content: insight.content.clone(),
            tags: insight.tags.clone(),
        }
    }

    /// Mutates one field of the buffer.
    pub fn set(&mut self, field: EditField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EditField::Title => self.title = value,
            EditField::Content => self.content = value,
            EditField::Tags => self.tags = value,
        }
    }

    /// Returns the buffer's current values as an update payload.
    pub fn draft(&self) -> InsightDraft {
        InsightDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_insight() -> Insight {
        Insight {
            id: 4,
            title: "Old title".to_string(),
            content: "Old content".to_string(),
            tags: "old".to_string(),
            summary: Some("server summary".to_string()),
            sentiment: None,
            keywords: None,
        }
    }

    #[test]
    fn buffer_copies_editable_fields() {
        let buffer = EditBuffer::from_insight(&sample_insight());
        assert_eq!(buffer.insight_id, 4);
        assert_eq!(buffer.title, "Old title");
        assert_eq!(buffer.tags, "old");
    }

    #[test]
    fn set_mutates_only_the_named_field() {
        let mut buffer = EditBuffer::from_insight(&sample_insight());
        buffer.set(EditField::Title, "New title");
        assert_eq!(buffer.title, "New title");
        assert_eq!(buffer.content, "Old content");
        assert_eq!(buffer.tags, "old");
    }

    #[test]
    fn draft_reflects_current_buffer_values() {
        let mut buffer = EditBuffer::from_insight(&sample_insight());
        buffer.set(EditField::Content, "edited");
        let draft = buffer.draft();
        assert_eq!(draft.content, "edited");
        assert_eq!(draft.title, "Old title");
    }

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!("Title".parse::<EditField>().unwrap(), EditField::Title);
        assert_eq!("tags".parse::<EditField>().unwrap(), EditField::Tags);
        assert!("summary".parse::<EditField>().is_err());
    }
}
