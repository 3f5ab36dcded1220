//! Strongly-typed identifiers for domain entities
//!
//! UUID newtypes, one per entity family, so a quotation id can never be
//! passed where a lead id belongs. Display adds a short prefix for log
//! readability; serde stays transparent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Lead intake identifiers
define_id!(LeadId, "LEAD");

// Billing identifiers
define_id!(QuotationId, "QTN");
define_id!(PaymentId, "PAY");

// Party identifiers
define_id!(ProfileId, "PRF");
define_id!(AgencyId, "AGY");

// Content identifiers
define_id!(DownloadId, "DLD");
define_id!(EventId, "EVT");
define_id!(ResourceId, "RSC");
define_id!(PromotionId, "PRM");
define_id!(NotificationId, "NTF");

// Campaign identifiers
define_id!(FormId, "FRM");
define_id!(FieldId, "FLD");
define_id!(SubmissionId, "SUB");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_id_display() {
        let id = LeadId::new();
        let display = id.to_string();
        assert!(display.starts_with("LEAD-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = QuotationId::new();
        let parsed: QuotationId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let form_id = FormId::from(uuid);
        let back: Uuid = form_id.into();
        assert_eq!(uuid, back);
    }
}
