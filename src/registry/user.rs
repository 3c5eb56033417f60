//! # User Records
//!
//! Ownership references for documents. Credential material lives with the
//! identity collaborator, not here; the registry only tracks who uploaded
//! what and how much.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered member of the institution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,

    /// Incremented once per successful upload by this user
    pub upload_count: u64,

    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            upload_count: 0,
            created_at: Utc::now(),
        }
    }
}
