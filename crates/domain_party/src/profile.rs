//! Student profile entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{AgencyId, ProfileId};
use crate::address::Address;

/// One completed qualification in a student's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub qualification: String,
    pub year_completed: i32,
    pub grade: Option<String>,
}

/// A document attached to a profile (passport scan, transcript, ...)
///
/// The file lives in object storage; only the durable URL is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub id: Uuid,
    pub label: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl DocumentLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            url: url.into(),
            uploaded_at: Utc::now(),
        }
    }
}

/// A student managed by an agency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Unique identifier
    pub id: ProfileId,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Home address
    pub address: Option<Address>,
    /// Education history, most recent first by convention
    pub education: Vec<EducationEntry>,
    /// Destination country the student is applying to
    pub target_country: Option<String>,
    /// Owning agency
    pub agency_id: AgencyId,
    /// Attached documents
    pub documents: Vec<DocumentLink>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl StudentProfile {
    /// Creates a new profile owned by an agency
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        agency_id: AgencyId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProfileId::new_v7(),
            name: name.into(),
            email: email.into(),
            phone: None,
            date_of_birth: None,
            address: None,
            education: Vec::new(),
            target_country: None,
            agency_id,
            documents: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Appends a qualification to the history
    pub fn add_education(&mut self, entry: EducationEntry) {
        self.education.push(entry);
        self.updated_at = Utc::now();
    }

    /// Attaches a stored document
    pub fn attach_document(&mut self, document: DocumentLink) {
        self.documents.push(document);
        self.updated_at = Utc::now();
    }

    /// Removes a document by id; returns whether one was removed
    pub fn remove_document(&mut self, id: Uuid) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        let removed = self.documents.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_construction() {
        let profile = StudentProfile::new("Ayesha Khan", "ayesha@example.com", AgencyId::new())
            .with_phone("+92-300-1234567")
            .with_address(Address::new("12-B Model Town", "Lahore", "54700", "Pakistan"));

        assert_eq!(profile.name, "Ayesha Khan");
        assert!(profile.address.is_some());
        assert!(profile.education.is_empty());
    }

    #[test]
    fn test_document_attach_and_remove() {
        let mut profile = StudentProfile::new("Ayesha Khan", "ayesha@example.com", AgencyId::new());
        let doc = DocumentLink::new("Passport", "https://files.example.com/passport.pdf");
        let id = doc.id;

        profile.attach_document(doc);
        assert_eq!(profile.documents.len(), 1);

        assert!(profile.remove_document(id));
        assert!(profile.documents.is_empty());
        assert!(!profile.remove_document(id));
    }

    #[test]
    fn test_education_history() {
        let mut profile = StudentProfile::new("Ayesha Khan", "ayesha@example.com", AgencyId::new());
        profile.add_education(EducationEntry {
            institution: "Kinnaird College".to_string(),
            qualification: "BSc Mathematics".to_string(),
            year_completed: 2024,
            grade: Some("3.7 GPA".to_string()),
        });
        assert_eq!(profile.education.len(), 1);
    }
}
