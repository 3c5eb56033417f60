//! # In-Process Registry Store
//!
//! Document and user records behind `RwLock`ed maps. Every operation that
//! must be atomic with respect to concurrent callers — the moderation
//! compare-and-swap and the download fetch-and-increment — runs entirely
//! under the write lock, so callers never see a read-modify-write window.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use uuid::Uuid;

use super::document::{Document, DocumentStatus};
use super::errors::{RegistryError, RegistryResult};
use super::query::{DocumentFilter, FacetField, SortOrder};
use super::user::UserRecord;

/// Metadata store for documents and users
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: RwLock<HashMap<Uuid, Document>>,
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new document record
    pub fn insert(&self, doc: Document) -> RegistryResult<Document> {
        let mut documents = self.write_documents()?;
        if documents.contains_key(&doc.id) {
            return Err(RegistryError::DuplicateDocument(doc.id));
        }
        documents.insert(doc.id, doc.clone());
        Ok(doc)
    }

    /// Look up a document by id
    pub fn find_by_id(&self, id: Uuid) -> RegistryResult<Option<Document>> {
        let documents = self.read_documents()?;
        Ok(documents.get(&id).cloned())
    }

    /// Filtered, sorted, bounded read view
    pub fn find_many(
        &self,
        filter: &DocumentFilter,
        sort: SortOrder,
        limit: usize,
    ) -> RegistryResult<Vec<Document>> {
        let documents = self.read_documents()?;
        let mut results: Vec<Document> = documents
            .values()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect();

        sort.apply(&mut results);
        results.truncate(limit);
        Ok(results)
    }

    /// Conditional status transition (compare-and-swap)
    ///
    /// The check and the write happen under one write-lock acquisition, so
    /// two concurrent moderation calls cannot both observe `expected`.
    pub fn update_status(
        &self,
        id: Uuid,
        expected: DocumentStatus,
        new: DocumentStatus,
        reason: Option<String>,
    ) -> RegistryResult<Document> {
        let mut documents = self.write_documents()?;
        let doc = documents
            .get_mut(&id)
            .ok_or(RegistryError::DocumentNotFound(id))?;

        if doc.status != expected {
            return Err(RegistryError::StatusConflict { actual: doc.status });
        }

        doc.status = new;
        doc.rejection_reason = match new {
            DocumentStatus::Rejected => reason,
            _ => None,
        };
        Ok(doc.clone())
    }

    /// Atomic fetch-and-increment of the download counter
    ///
    /// Returns the post-increment value.
    pub fn increment_download_count(&self, id: Uuid) -> RegistryResult<u64> {
        let mut documents = self.write_documents()?;
        let doc = documents
            .get_mut(&id)
            .ok_or(RegistryError::DocumentNotFound(id))?;

        doc.download_count += 1;
        Ok(doc.download_count)
    }

    /// Remove a document record, returning it
    pub fn delete_by_id(&self, id: Uuid) -> RegistryResult<Document> {
        let mut documents = self.write_documents()?;
        documents
            .remove(&id)
            .ok_or(RegistryError::DocumentNotFound(id))
    }

    /// Distinct non-empty values of a field across matching documents,
    /// ascending
    pub fn distinct(&self, field: FacetField, filter: &DocumentFilter) -> RegistryResult<Vec<String>> {
        let documents = self.read_documents()?;
        let values: BTreeSet<String> = documents
            .values()
            .filter(|doc| filter.matches(doc))
            .map(|doc| field.value(doc).to_string())
            .filter(|value| !value.is_empty())
            .collect();
        Ok(values.into_iter().collect())
    }

    /// Number of documents matching the filter
    pub fn count_documents(&self, filter: &DocumentFilter) -> RegistryResult<usize> {
        let documents = self.read_documents()?;
        Ok(documents.values().filter(|doc| filter.matches(doc)).count())
    }

    /// Sum of download counters across matching documents
    pub fn sum_download_counts(&self, filter: &DocumentFilter) -> RegistryResult<u64> {
        let documents = self.read_documents()?;
        Ok(documents
            .values()
            .filter(|doc| filter.matches(doc))
            .map(|doc| doc.download_count)
            .sum())
    }

    /// Register a new user
    pub fn register_user(&self, name: impl Into<String>) -> RegistryResult<UserRecord> {
        let user = UserRecord::new(name);
        let mut users = self.write_users()?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Look up a user by id
    pub fn find_user(&self, id: Uuid) -> RegistryResult<Option<UserRecord>> {
        let users = self.read_users()?;
        Ok(users.get(&id).cloned())
    }

    /// Bump a user's upload counter, returning the new value
    pub fn increment_upload_count(&self, id: Uuid) -> RegistryResult<u64> {
        let mut users = self.write_users()?;
        let user = users.get_mut(&id).ok_or(RegistryError::UserNotFound(id))?;
        user.upload_count += 1;
        Ok(user.upload_count)
    }

    /// Total registered users
    pub fn count_users(&self) -> RegistryResult<usize> {
        let users = self.read_users()?;
        Ok(users.len())
    }

    fn read_documents(&self) -> RegistryResult<std::sync::RwLockReadGuard<'_, HashMap<Uuid, Document>>> {
        self.documents
            .read()
            .map_err(|_| RegistryError::Internal("document lock poisoned".into()))
    }

    fn write_documents(&self) -> RegistryResult<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Document>>> {
        self.documents
            .write()
            .map_err(|_| RegistryError::Internal("document lock poisoned".into()))
    }

    fn read_users(&self) -> RegistryResult<std::sync::RwLockReadGuard<'_, HashMap<Uuid, UserRecord>>> {
        self.users
            .read()
            .map_err(|_| RegistryError::Internal("user lock poisoned".into()))
    }

    fn write_users(&self) -> RegistryResult<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, UserRecord>>> {
        self.users
            .write()
            .map_err(|_| RegistryError::Internal("user lock poisoned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::document::DocumentMeta;
    use std::sync::Arc;

    fn meta(title: &str, subject: &str, year: &str) -> DocumentMeta {
        DocumentMeta {
            title: title.to_string(),
            subject: subject.to_string(),
            class: "BSc CS".to_string(),
            semester: "3".to_string(),
            year: year.to_string(),
            exam_type: "final".to_string(),
            tags: Vec::new(),
        }
    }

    fn insert_doc(registry: &DocumentRegistry, title: &str, subject: &str, year: &str) -> Document {
        let doc = Document::new(meta(title, subject, year), format!("{}.pdf", title), None, Uuid::new_v4());
        registry.insert(doc).unwrap()
    }

    #[test]
    fn test_insert_and_find() {
        let registry = DocumentRegistry::new();
        let doc = insert_doc(&registry, "a", "Math", "2024");

        let found = registry.find_by_id(doc.id).unwrap().unwrap();
        assert_eq!(found.title, "a");
        assert!(registry.find_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let registry = DocumentRegistry::new();
        let doc = insert_doc(&registry, "a", "Math", "2024");

        let result = registry.insert(doc);
        assert!(matches!(result, Err(RegistryError::DuplicateDocument(_))));
    }

    #[test]
    fn test_update_status_is_conditional() {
        let registry = DocumentRegistry::new();
        let doc = insert_doc(&registry, "a", "Math", "2024");

        let approved = registry
            .update_status(doc.id, DocumentStatus::Pending, DocumentStatus::Approved, None)
            .unwrap();
        assert_eq!(approved.status, DocumentStatus::Approved);

        // second transition sees the new state and reports it
        let err = registry
            .update_status(doc.id, DocumentStatus::Pending, DocumentStatus::Approved, None)
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::StatusConflict {
                actual: DocumentStatus::Approved
            }
        ));
    }

    #[test]
    fn test_reject_stores_reason_and_approve_clears_it() {
        let registry = DocumentRegistry::new();
        let doc = insert_doc(&registry, "a", "Math", "2024");

        let rejected = registry
            .update_status(
                doc.id,
                DocumentStatus::Pending,
                DocumentStatus::Rejected,
                Some("blurry scan".to_string()),
            )
            .unwrap();
        assert_eq!(rejected.rejection_reason.as_deref(), Some("blurry scan"));

        let doc2 = insert_doc(&registry, "b", "Math", "2024");
        let approved = registry
            .update_status(doc2.id, DocumentStatus::Pending, DocumentStatus::Approved, None)
            .unwrap();
        assert!(approved.rejection_reason.is_none());
    }

    #[test]
    fn test_concurrent_increments_lose_nothing() {
        let registry = Arc::new(DocumentRegistry::new());
        let doc = insert_doc(&registry, "hot", "Math", "2024");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            let id = doc.id;
            handles.push(std::thread::spawn(move || {
                for _ in 0..25 {
                    registry.increment_download_count(id).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let final_doc = registry.find_by_id(doc.id).unwrap().unwrap();
        assert_eq!(final_doc.download_count, 200);
    }

    #[test]
    fn test_find_many_filters_sorts_limits() {
        let registry = DocumentRegistry::new();
        for i in 0..5 {
            let doc = insert_doc(&registry, &format!("m{}", i), "Math", "2024");
            registry
                .update_status(doc.id, DocumentStatus::Pending, DocumentStatus::Approved, None)
                .unwrap();
        }
        insert_doc(&registry, "p0", "Physics", "2024");

        let filter = DocumentFilter {
            status: Some(DocumentStatus::Approved),
            subject: Some("math".to_string()),
            ..Default::default()
        };
        let results = registry.find_many(&filter, SortOrder::Newest, 3).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|d| d.subject == "Math"));
        assert!(results.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_delete_removes_record() {
        let registry = DocumentRegistry::new();
        let doc = insert_doc(&registry, "a", "Math", "2024");

        registry.delete_by_id(doc.id).unwrap();
        assert!(registry.find_by_id(doc.id).unwrap().is_none());
        assert!(matches!(
            registry.delete_by_id(doc.id),
            Err(RegistryError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_distinct_skips_empty_and_sorts() {
        let registry = DocumentRegistry::new();
        insert_doc(&registry, "a", "Physics", "2023");
        insert_doc(&registry, "b", "Math", "2024");
        insert_doc(&registry, "c", "Math", "2024");
        insert_doc(&registry, "d", "", "2022");

        let subjects = registry
            .distinct(FacetField::Subject, &DocumentFilter::default())
            .unwrap();
        assert_eq!(subjects, vec!["Math".to_string(), "Physics".to_string()]);
    }

    #[test]
    fn test_user_upload_counter() {
        let registry = DocumentRegistry::new();
        let user = registry.register_user("Priya").unwrap();

        assert_eq!(registry.increment_upload_count(user.id).unwrap(), 1);
        assert_eq!(registry.increment_upload_count(user.id).unwrap(), 2);
        assert!(matches!(
            registry.increment_upload_count(Uuid::new_v4()),
            Err(RegistryError::UserNotFound(_))
        ));
        assert_eq!(registry.count_users().unwrap(), 1);
    }
}
