//! Agency (tenant) management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::AgencyId;

/// Agency status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgencyStatus {
    Active,
    Suspended,
}

/// Role of a portal user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Network head-office administrator
    Admin,
    /// Agency back-office staff
    AgencyStaff,
    /// Student-facing counselor
    Counselor,
}

impl UserRole {
    /// Whether this role can manage records across all agencies
    pub fn can_manage_network(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Whether this role can issue quotations
    pub fn can_issue_quotations(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::AgencyStaff | UserRole::Counselor)
    }
}

/// A partner agency using the portal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agency {
    /// Unique identifier
    pub id: AgencyId,
    /// Trading name
    pub name: String,
    /// Country the agency operates in
    pub country: String,
    /// Contact email
    pub contact_email: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Logo URL (object storage)
    pub logo_url: Option<String>,
    /// Status
    pub status: AgencyStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Agency {
    /// Creates a new active agency
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AgencyId::new_v7(),
            name: name.into(),
            country: country.into(),
            contact_email: contact_email.into(),
            phone: None,
            logo_url: None,
            status: AgencyStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_logo(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    /// Suspends the agency; its users lose portal access
    pub fn suspend(&mut self) {
        self.status = AgencyStatus::Suspended;
        self.updated_at = Utc::now();
    }

    /// Reinstates a suspended agency
    pub fn reinstate(&mut self) {
        self.status = AgencyStatus::Active;
        self.updated_at = Utc::now();
    }

    pub fn is_active(&self) -> bool {
        self.status == AgencyStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspend_and_reinstate() {
        let mut agency = Agency::new("StudyBridge Lahore", "Pakistan", "info@studybridge.pk");
        assert!(agency.is_active());

        agency.suspend();
        assert_eq!(agency.status, AgencyStatus::Suspended);

        agency.reinstate();
        assert!(agency.is_active());
    }

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Admin.can_manage_network());
        assert!(!UserRole::AgencyStaff.can_manage_network());
        assert!(UserRole::Counselor.can_issue_quotations());
    }
}
