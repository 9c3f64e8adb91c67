//! Server-derived read-only views: clustering and extraction results.
//!
//! Both are recomputed by the remote service on every request. The client
//! holds at most the latest result and overwrites it on each fetch.

use serde::{Deserialize, Serialize};

/// A server-derived grouping of insights sharing a semantic theme.
///
/// `representative` is one member insight's text, used as a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_id: i64,
    #[serde(default)]
    pub representative: Option<String>,
    #[serde(default)]
    pub insight_ids: Vec<i64>,
}

/// A server-derived structured breakdown of one text's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_deserializes_from_service_payload() {
        let json = r#"{
            "cluster_id": 2,
            "representative": "Quarterly planning",
            "insight_ids": [1, 4, 9]
        }"#;
        let cluster: Cluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.cluster_id, 2);
        assert_eq!(cluster.insight_ids, vec![1, 4, 9]);
        assert_eq!(cluster.representative.as_deref(), Some("Quarterly planning"));
    }

    #[test]
    fn extraction_tolerates_missing_sections() {
        let json = r#"{"tone": "upbeat"}"#;
        let extraction: Extraction = serde_json::from_str(json).unwrap();
        assert!(extraction.key_points.is_empty());
        assert!(extraction.action_items.is_empty());
        assert_eq!(extraction.tone, "upbeat");
    }
}
