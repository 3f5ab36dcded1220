//! Promotions
//!
//! Seasonal offers shown on agency dashboards, each with a banner and a
//! run window.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::PromotionId;
use crate::error::ContentError;

/// A promotional offer with a run window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    /// Unique identifier
    pub id: PromotionId,
    /// Title
    pub title: String,
    /// Offer copy
    pub description: Option<String>,
    /// Banner image URL
    pub banner_url: Option<String>,
    /// First day the offer runs
    pub starts_on: NaiveDate,
    /// Last day the offer runs (inclusive)
    pub ends_on: NaiveDate,
    /// Manual kill switch, independent of the window
    pub active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// Creates a new promotion, rejecting an inverted window
    pub fn new(
        title: impl Into<String>,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    ) -> Result<Self, ContentError> {
        if ends_on < starts_on {
            return Err(ContentError::InvalidPeriod(format!(
                "promotion cannot end ({}) before it starts ({})",
                ends_on, starts_on
            )));
        }
        let now = Utc::now();
        Ok(Self {
            id: PromotionId::new_v7(),
            title: title.into(),
            description: None,
            banner_url: None,
            starts_on,
            ends_on,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_banner(mut self, banner_url: impl Into<String>) -> Self {
        self.banner_url = Some(banner_url.into());
        self
    }

    /// Whether the offer should be shown today
    pub fn is_running(&self, today: NaiveDate) -> bool {
        self.active && today >= self.starts_on && today <= self.ends_on
    }

    /// Pulls the offer regardless of the window
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_window_is_inclusive() {
        let p = Promotion::new("Eid Offer", day(5), day(10)).unwrap();
        assert!(!p.is_running(day(4)));
        assert!(p.is_running(day(5)));
        assert!(p.is_running(day(10)));
        assert!(!p.is_running(day(11)));
    }

    #[test]
    fn test_deactivated_promotion_never_runs() {
        let mut p = Promotion::new("Eid Offer", day(5), day(10)).unwrap();
        p.deactivate();
        assert!(!p.is_running(day(7)));
    }

    #[test]
    fn test_single_day_window() {
        let p = Promotion::new("Flash Sale", day(7), day(7)).unwrap();
        assert!(p.is_running(day(7)));
    }

    #[test]
    fn test_inverted_window_rejected() {
        assert!(Promotion::new("Broken", day(10), day(5)).is_err());
    }
}
