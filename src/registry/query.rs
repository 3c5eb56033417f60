//! # Query Model
//!
//! Filter, sort and facet descriptors for registry reads. All supplied
//! predicates combine conjunctively; the free-text arm is disjunctive across
//! title, subject and tags but conjoined with the rest.

use serde::Deserialize;
use uuid::Uuid;

use super::document::{Document, DocumentStatus};

/// Predicates over document records
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Exact status match
    pub status: Option<DocumentStatus>,

    /// Ownership scope
    pub uploaded_by: Option<Uuid>,

    /// Case-insensitive substring on subject
    pub subject: Option<String>,

    /// Case-insensitive substring on class
    pub class: Option<String>,

    /// Exact semester
    pub semester: Option<String>,

    /// Exact exam type
    pub exam_type: Option<String>,

    /// Exact year
    pub year: Option<String>,

    /// Case-insensitive substring on title OR subject OR any tag
    pub search: Option<String>,
}

impl DocumentFilter {
    /// Filter matching only the given status
    pub fn with_status(status: DocumentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Filter matching a single owner
    pub fn owned_by(user_id: Uuid) -> Self {
        Self {
            uploaded_by: Some(user_id),
            ..Default::default()
        }
    }

    /// Whether a document satisfies every supplied predicate
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(status) = self.status {
            if doc.status != status {
                return false;
            }
        }

        if let Some(owner) = self.uploaded_by {
            if doc.uploaded_by != owner {
                return false;
            }
        }

        if let Some(ref subject) = self.subject {
            if !contains_ci(&doc.subject, subject) {
                return false;
            }
        }

        if let Some(ref class) = self.class {
            if !contains_ci(&doc.class, class) {
                return false;
            }
        }

        if let Some(ref semester) = self.semester {
            if &doc.semester != semester {
                return false;
            }
        }

        if let Some(ref exam_type) = self.exam_type {
            if &doc.exam_type != exam_type {
                return false;
            }
        }

        if let Some(ref year) = self.year {
            if &doc.year != year {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            let hit = contains_ci(&doc.title, search)
                || contains_ci(&doc.subject, search)
                || doc.tags.iter().any(|tag| contains_ci(tag, search));
            if !hit {
                return false;
            }
        }

        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sort order for document listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Creation time descending
    #[default]
    Newest,
    /// Download count descending, creation time as tiebreak
    Popular,
    /// Title ascending
    Title,
}

impl SortOrder {
    /// Parse a `sortBy` query value, defaulting to newest
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("popular") => SortOrder::Popular,
            Some("title") => SortOrder::Title,
            _ => SortOrder::Newest,
        }
    }

    /// Sort documents in place according to this order
    pub fn apply(&self, docs: &mut [Document]) {
        match self {
            SortOrder::Newest => docs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Popular => docs.sort_by(|a, b| {
                b.download_count
                    .cmp(&a.download_count)
                    .then(b.created_at.cmp(&a.created_at))
            }),
            SortOrder::Title => docs.sort_by(|a, b| a.title.cmp(&b.title)),
        }
    }
}

/// Fields exposed to facet discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetField {
    Subject,
    Class,
    Semester,
    ExamType,
    Year,
}

impl FacetField {
    /// Value of this field on a document
    pub fn value<'a>(&self, doc: &'a Document) -> &'a str {
        match self {
            FacetField::Subject => &doc.subject,
            FacetField::Class => &doc.class,
            FacetField::Semester => &doc.semester,
            FacetField::ExamType => &doc.exam_type,
            FacetField::Year => &doc.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::document::DocumentMeta;

    fn doc(title: &str, subject: &str, tags: &[&str]) -> Document {
        let meta = DocumentMeta {
            title: title.to_string(),
            subject: subject.to_string(),
            class: "BSc CS".to_string(),
            semester: "3".to_string(),
            year: "2024".to_string(),
            exam_type: "final".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        Document::new(meta, "key.pdf".into(), None, Uuid::new_v4())
    }

    #[test]
    fn test_subject_is_substring_case_insensitive() {
        let filter = DocumentFilter {
            subject: Some("math".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&doc("Algebra", "Mathematics", &[])));
        assert!(!filter.matches(&doc("Physics 1", "Physics", &[])));
    }

    #[test]
    fn test_semester_is_exact() {
        let filter = DocumentFilter {
            semester: Some("3".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&doc("A", "Math", &[])));

        let other = DocumentFilter {
            semester: Some("33".to_string()),
            ..Default::default()
        };
        assert!(!other.matches(&doc("A", "Math", &[])));
    }

    #[test]
    fn test_search_spans_title_subject_tags() {
        let filter = DocumentFilter {
            search: Some("GRAPH".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&doc("Graph Theory Final", "Math", &[])));
        assert!(filter.matches(&doc("Final", "Graph Algorithms", &[])));
        assert!(filter.matches(&doc("Final", "Math", &["graphs", "trees"])));
        assert!(!filter.matches(&doc("Final", "Math", &["trees"])));
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let filter = DocumentFilter {
            subject: Some("math".to_string()),
            year: Some("2023".to_string()),
            ..Default::default()
        };
        // year mismatches even though subject hits
        assert!(!filter.matches(&doc("A", "Mathematics", &[])));
    }

    #[test]
    fn test_sort_parse_defaults_to_newest() {
        assert_eq!(SortOrder::parse(None), SortOrder::Newest);
        assert_eq!(SortOrder::parse(Some("popular")), SortOrder::Popular);
        assert_eq!(SortOrder::parse(Some("title")), SortOrder::Title);
        assert_eq!(SortOrder::parse(Some("nonsense")), SortOrder::Newest);
    }

    #[test]
    fn test_popular_sort_breaks_ties_by_recency() {
        let mut a = doc("A", "Math", &[]);
        let mut b = doc("B", "Math", &[]);
        a.download_count = 5;
        b.download_count = 5;
        b.created_at = a.created_at + chrono::Duration::seconds(10);

        let mut docs = vec![a.clone(), b.clone()];
        SortOrder::Popular.apply(&mut docs);
        assert_eq!(docs[0].id, b.id);
    }
}
