//! Lead aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{AgencyId, LeadId};
use crate::error::LeadError;

/// Lead status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    /// Enquiry received, nobody has reached out yet
    New,
    /// A counselor has made first contact
    Contacted,
    /// Budget, destination, and intake confirmed viable
    Qualified,
    /// Converted into a student profile / quotation
    Converted,
    /// Dropped out of the funnel
    Lost,
}

/// Where the enquiry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadSource {
    Website,
    Referral,
    WalkIn,
    Campaign,
    SocialMedia,
    Other,
}

/// Intended study level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyLevel {
    Foundation,
    Undergraduate,
    Postgraduate,
    Doctorate,
    Language,
    Vocational,
}

/// What the prospect wants to study, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPreference {
    pub level: StudyLevel,
    pub field_of_study: String,
    /// Target intake, e.g. "Fall 2026"
    pub intake: String,
}

/// A dated free-text note on a lead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadNote {
    pub id: Uuid,
    pub author_email: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl LeadNote {
    pub fn new(author_email: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_email: author_email.into(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// A study-abroad enquiry working its way through the funnel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier
    pub id: LeadId,
    /// Human-readable lead number (YYMM + serial)
    pub lead_number: String,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: Option<String>,
    /// Destination country of interest
    pub country_of_interest: String,
    /// Study preference
    pub study_preference: StudyPreference,
    /// Enquiry source
    pub source: LeadSource,
    /// Owning agency, if already routed to one
    pub agency_id: Option<AgencyId>,
    /// Status
    pub status: LeadStatus,
    /// Counselor notes
    pub notes: Vec<LeadNote>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Creates a new lead in the `New` state.
    ///
    /// The lead number is issued by the counter store before construction;
    /// this constructor only records it.
    pub fn new(
        lead_number: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        country_of_interest: impl Into<String>,
        study_preference: StudyPreference,
        source: LeadSource,
    ) -> Result<Self, LeadError> {
        let name = name.into();
        let email = email.into();
        validate_contact(&name, &email)?;

        let now = Utc::now();
        Ok(Self {
            id: LeadId::new_v7(),
            lead_number: lead_number.into(),
            name,
            email,
            phone: None,
            country_of_interest: country_of_interest.into(),
            study_preference,
            source,
            agency_id: None,
            status: LeadStatus::New,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Routes the lead to an agency
    pub fn assign_to(&mut self, agency_id: AgencyId) {
        self.agency_id = Some(agency_id);
        self.updated_at = Utc::now();
    }

    /// Updates the status
    pub fn update_status(&mut self, status: LeadStatus) -> Result<(), LeadError> {
        if !self.can_transition_to(status) {
            return Err(LeadError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", status),
            });
        }
        tracing::debug!(
            lead = %self.lead_number,
            from = ?self.status,
            to = ?status,
            "Lead status changed"
        );
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Appends a counselor note
    pub fn add_note(&mut self, note: LeadNote) {
        self.notes.push(note);
        self.updated_at = Utc::now();
    }

    /// Checks if transition is valid
    ///
    /// A lost lead can only re-enter the funnel at `Contacted`.
    fn can_transition_to(&self, target: LeadStatus) -> bool {
        use LeadStatus::*;
        matches!(
            (self.status, target),
            (New, Contacted)
                | (New, Lost)
                | (Contacted, Qualified)
                | (Contacted, Lost)
                | (Qualified, Converted)
                | (Qualified, Lost)
                | (Lost, Contacted)
        )
    }
}

fn validate_contact(name: &str, email: &str) -> Result<(), LeadError> {
    if name.trim().is_empty() {
        return Err(LeadError::validation("name cannot be empty"));
    }
    if !email.contains('@') {
        return Err(LeadError::validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preference() -> StudyPreference {
        StudyPreference {
            level: StudyLevel::Postgraduate,
            field_of_study: "Computer Science".to_string(),
            intake: "Fall 2026".to_string(),
        }
    }

    fn sample_lead() -> Lead {
        Lead::new(
            "2506001",
            "Ayesha Khan",
            "ayesha@example.com",
            "United Kingdom",
            preference(),
            LeadSource::Website,
        )
        .unwrap()
    }

    #[test]
    fn test_new_lead_starts_new() {
        let lead = sample_lead();
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.lead_number, "2506001");
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut lead = sample_lead();
        lead.update_status(LeadStatus::Contacted).unwrap();
        lead.update_status(LeadStatus::Qualified).unwrap();
        lead.update_status(LeadStatus::Converted).unwrap();
        assert_eq!(lead.status, LeadStatus::Converted);
    }

    #[test]
    fn test_cannot_skip_qualification() {
        let mut lead = sample_lead();
        let err = lead.update_status(LeadStatus::Converted).unwrap_err();
        assert!(matches!(err, LeadError::InvalidStatusTransition { .. }));
        assert_eq!(lead.status, LeadStatus::New);
    }

    #[test]
    fn test_lost_lead_reopens_at_contacted() {
        let mut lead = sample_lead();
        lead.update_status(LeadStatus::Lost).unwrap();
        lead.update_status(LeadStatus::Contacted).unwrap();
        assert_eq!(lead.status, LeadStatus::Contacted);
    }

    #[test]
    fn test_converted_is_terminal() {
        let mut lead = sample_lead();
        lead.update_status(LeadStatus::Contacted).unwrap();
        lead.update_status(LeadStatus::Qualified).unwrap();
        lead.update_status(LeadStatus::Converted).unwrap();
        assert!(lead.update_status(LeadStatus::Lost).is_err());
    }

    #[test]
    fn test_rejects_bad_email() {
        let result = Lead::new(
            "2506002",
            "No Email",
            "not-an-email",
            "Canada",
            preference(),
            LeadSource::WalkIn,
        );
        assert!(matches!(result, Err(LeadError::Validation(_))));
    }

    #[test]
    fn test_notes_accumulate() {
        let mut lead = sample_lead();
        lead.add_note(LeadNote::new("counselor@agency.pk", "Called, no answer"));
        lead.add_note(LeadNote::new("counselor@agency.pk", "Interested in UK unis"));
        assert_eq!(lead.notes.len(), 2);
    }
}
