//! # Document Records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Moderation state of a document
///
/// Transitions only originate from `Pending`; both `Approved` and `Rejected`
/// are terminal under current rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        }
    }

    /// Parse a status query parameter
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "pending" => Some(DocumentStatus::Pending),
            "approved" => Some(DocumentStatus::Approved),
            "rejected" => Some(DocumentStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive fields supplied by the submitter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub title: String,
    pub subject: String,
    pub class: String,
    pub semester: String,
    pub year: String,
    pub exam_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A submitted document plus its moderation state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub subject: String,
    pub class: String,
    pub semester: String,
    pub year: String,
    pub exam_type: String,

    /// Storage key under which the binary resides
    pub file_name: String,

    /// Public locator for the blob; present iff a blob exists
    pub file_url: Option<String>,

    pub uploaded_by: Uuid,
    pub tags: Vec<String>,

    pub status: DocumentStatus,

    /// Present iff `status == Rejected`
    pub rejection_reason: Option<String>,

    /// Mutated only through the registry's atomic increment
    pub download_count: u64,

    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Create a new pending document
    pub fn new(meta: DocumentMeta, file_name: String, file_url: Option<String>, uploaded_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: meta.title,
            subject: meta.subject,
            class: meta.class,
            semester: meta.semester,
            year: meta.year,
            exam_type: meta.exam_type,
            file_name,
            file_url,
            uploaded_by,
            tags: meta.tags,
            status: DocumentStatus::Pending,
            rejection_reason: None,
            download_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Whether unprivileged queries may see this document
    pub fn is_visible(&self) -> bool {
        self.status == DocumentStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_meta() -> DocumentMeta {
        DocumentMeta {
            title: "Algebra Midterm".to_string(),
            subject: "Mathematics".to_string(),
            class: "BSc CS".to_string(),
            semester: "3".to_string(),
            year: "2024".to_string(),
            exam_type: "midterm".to_string(),
            tags: vec!["algebra".to_string()],
        }
    }

    #[test]
    fn test_new_document_is_pending() {
        let doc = Document::new(sample_meta(), "algebra_1.pdf".into(), None, Uuid::new_v4());
        assert_eq!(doc.status, DocumentStatus::Pending);
        assert_eq!(doc.download_count, 0);
        assert!(doc.rejection_reason.is_none());
        assert!(!doc.is_visible());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(DocumentStatus::parse("Approved"), Some(DocumentStatus::Approved));
        assert_eq!(DocumentStatus::parse("rejected"), Some(DocumentStatus::Rejected));
        assert_eq!(DocumentStatus::parse("archived"), None);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&DocumentStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
