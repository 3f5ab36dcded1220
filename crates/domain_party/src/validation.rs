//! Profile validation rules
//!
//! # Validation Rules
//!
//! - Name must be non-empty
//! - Email must be a syntactically valid address
//! - Date of birth, when present, must be in the past and the applicant
//!   no older than 100 years (older is a warning, not an error)
//! - Education years must not be in the future

use chrono::{Datelike, Utc};
use validator::ValidateEmail;

use crate::profile::StudentProfile;

/// Result of profile validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the profile is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for student profiles
pub struct ProfileValidator;

impl ProfileValidator {
    /// Validates a profile before it is persisted
    pub fn validate(profile: &StudentProfile) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let today = Utc::now().date_naive();

        if profile.name.trim().is_empty() {
            result.add_error("name cannot be empty");
        }

        if !profile.email.validate_email() {
            result.add_error(format!("'{}' is not a valid email address", profile.email));
        }

        if let Some(dob) = profile.date_of_birth {
            if dob >= today {
                result.add_error("date of birth must be in the past");
            } else if today.year() - dob.year() > 100 {
                result.add_warning("applicant is over 100 years old; check date of birth");
            }
        }

        for entry in &profile.education {
            if entry.year_completed > today.year() {
                result.add_error(format!(
                    "education entry '{}' is completed in the future",
                    entry.qualification
                ));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::EducationEntry;
    use chrono::NaiveDate;
    use core_kernel::AgencyId;

    fn profile() -> StudentProfile {
        StudentProfile::new("Ayesha Khan", "ayesha@example.com", AgencyId::new())
    }

    #[test]
    fn test_valid_profile_passes() {
        let result = ProfileValidator::validate(&profile());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_bad_email_fails() {
        let mut p = profile();
        p.email = "nope".to_string();
        let result = ProfileValidator::validate(&p);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_future_dob_fails() {
        let mut p = profile();
        p.date_of_birth = NaiveDate::from_ymd_opt(2999, 1, 1);
        let result = ProfileValidator::validate(&p);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_future_education_year_fails() {
        let mut p = profile();
        p.add_education(EducationEntry {
            institution: "Future University".to_string(),
            qualification: "BSc".to_string(),
            year_completed: 2999,
            grade: None,
        });
        let result = ProfileValidator::validate(&p);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_merge_combines_outcomes() {
        let mut a = ValidationResult::ok();
        a.add_warning("minor issue");
        let b = ValidationResult::fail(vec!["broken".to_string()]);

        a.merge(b);
        assert!(!a.is_valid);
        assert_eq!(a.errors.len(), 1);
        assert_eq!(a.warnings.len(), 1);
    }
}
