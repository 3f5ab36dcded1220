//! Calendar events
//!
//! Education fairs, university visits, interview days. The calendar view
//! asks for events inside a visible window, so the range query is the one
//! operation with actual logic here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AgencyId, EventId};
use crate::error::ContentError;

/// A scheduled event on the shared calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Unique identifier
    pub id: EventId,
    /// Title
    pub title: String,
    /// Description
    pub description: Option<String>,
    /// Venue or meeting link
    pub location: Option<String>,
    /// Start instant
    pub starts_at: DateTime<Utc>,
    /// End instant (strictly after start)
    pub ends_at: DateTime<Utc>,
    /// Owning agency; None for network-wide events
    pub agency_id: Option<AgencyId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// Creates a new event, rejecting an empty or inverted period
    pub fn new(
        title: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Self, ContentError> {
        if ends_at <= starts_at {
            return Err(ContentError::InvalidPeriod(format!(
                "event must end after it starts ({} >= {})",
                starts_at, ends_at
            )));
        }
        let now = Utc::now();
        Ok(Self {
            id: EventId::new_v7(),
            title: title.into(),
            description: None,
            location: None,
            starts_at,
            ends_at,
            agency_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn for_agency(mut self, agency_id: AgencyId) -> Self {
        self.agency_id = Some(agency_id);
        self
    }

    /// Whether the event overlaps the half-open range `[from, to)`
    pub fn overlaps_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.starts_at < to && self.ends_at > from
    }
}

/// Filters events down to those overlapping `[from, to)`, preserving order
pub fn events_in_range(
    events: &[CalendarEvent],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.overlaps_range(from, to)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    fn event(start_day: u32, end_day: u32) -> CalendarEvent {
        CalendarEvent::new("UK Education Fair", at(start_day, 9), at(end_day, 17)).unwrap()
    }

    #[test]
    fn test_inverted_period_rejected() {
        let result = CalendarEvent::new("Broken", at(10, 17), at(10, 9));
        assert!(matches!(result, Err(ContentError::InvalidPeriod(_))));
    }

    #[test]
    fn test_overlap_cases() {
        let e = event(10, 12);

        // Fully inside the window
        assert!(e.overlaps_range(at(9, 0), at(13, 0)));
        // Window inside the event
        assert!(e.overlaps_range(at(11, 0), at(11, 12)));
        // Straddles the start
        assert!(e.overlaps_range(at(9, 0), at(10, 12)));
        // Touches only the end boundary (half-open): no overlap
        assert!(!e.overlaps_range(at(12, 17), at(14, 0)));
        // Entirely before
        assert!(!e.overlaps_range(at(1, 0), at(9, 0)));
    }

    #[test]
    fn test_events_in_range_filters_and_preserves_order() {
        let events = vec![event(1, 2), event(10, 12), event(20, 21)];
        let hits = events_in_range(&events, at(9, 0), at(15, 0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, events[1].id);

        let all = events_in_range(&events, at(1, 0), at(28, 0));
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, events[0].id);
    }
}
