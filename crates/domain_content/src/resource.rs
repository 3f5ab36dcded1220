//! External resources
//!
//! Links to partner portals, scholarship pages, test-prep material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ResourceId;

/// A curated external link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier
    pub id: ResourceId,
    /// Title
    pub title: String,
    /// Description
    pub description: Option<String>,
    /// External URL
    pub link: String,
    /// Free-form category tag
    pub category: Option<String>,
    /// Whether the resource is listed
    pub active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Creates a new active resource
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ResourceId::new_v7(),
            title: title.into(),
            description: None,
            link: link.into(),
            category: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Unlists the resource without deleting it
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}
