//! Repository implementations
//!
//! One module per domain: row types, the PostgreSQL enum mirrors of the
//! domain enums, and the repository itself.

pub mod lead;
pub mod billing;
pub mod party;
pub mod campaign;
pub mod content;

pub use lead::LeadRepository;
pub use billing::{PaymentRepository, QuotationRepository};
pub use party::{AgencyRepository, ProfileRepository};
pub use campaign::CampaignRepository;
pub use content::{
    DownloadRepository, EventRepository, NotificationRepository, PromotionRepository,
    ResourceRepository,
};
