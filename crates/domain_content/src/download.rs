//! Downloadable documents
//!
//! Brochures, fee schedules, visa checklists. The file itself lives in
//! object storage; records hold the durable URL verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::DownloadId;

/// A downloadable document offered on the portal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Download {
    /// Unique identifier
    pub id: DownloadId,
    /// Title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Durable object-storage URL
    pub file_url: String,
    /// Destination country this document applies to, if any
    pub country: Option<String>,
    /// Free-form category tag
    pub category: Option<String>,
    /// Whether the document is listed
    pub active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Download {
    /// Creates a new active download
    pub fn new(title: impl Into<String>, file_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: DownloadId::new_v7(),
            title: title.into(),
            description: None,
            file_url: file_url.into(),
            country: None,
            category: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Unlists the document without deleting it
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}
