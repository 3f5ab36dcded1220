//! Integration tests for the content domain

use chrono::{NaiveDate, TimeZone, Utc};
use domain_content::{
    events_in_range, CalendarEvent, Download, Notification, NotificationChannel, Promotion,
    Resource,
};

#[test]
fn test_download_builders_and_deactivation() {
    let mut d = Download::new("UK Visa Checklist", "https://files.example.com/uk-visa.pdf")
        .with_country("United Kingdom")
        .with_category("visa");

    assert!(d.active);
    assert_eq!(d.country.as_deref(), Some("United Kingdom"));

    d.deactivate();
    assert!(!d.active);
}

#[test]
fn test_resource_serde_round_trip() {
    let r = Resource::new("IELTS practice", "https://ielts.example.com").with_category("test-prep");
    let json = serde_json::to_string(&r).unwrap();
    let back: Resource = serde_json::from_str(&json).unwrap();
    assert_eq!(back.link, r.link);
    assert_eq!(back.category.as_deref(), Some("test-prep"));
}

#[test]
fn test_calendar_range_query_over_a_month() {
    let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap();

    let events = vec![
        CalendarEvent::new("Australia info session", day(3, 10), day(3, 12)).unwrap(),
        CalendarEvent::new("UK fair", day(14, 9), day(15, 17))
            .unwrap()
            .with_location("Lahore Expo Centre"),
        CalendarEvent::new("Canada webinar", day(29, 18), day(29, 19)).unwrap(),
    ];

    // Mid-month window catches only the fair
    let hits = events_in_range(&events, day(10, 0), day(20, 0));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "UK fair");

    // Whole month
    assert_eq!(events_in_range(&events, day(1, 0), day(30, 23)).len(), 3);

    // Empty window
    assert!(events_in_range(&events, day(5, 0), day(5, 1)).is_empty());
}

#[test]
fn test_promotion_window_against_fixed_dates() {
    let p = Promotion::new(
        "Eid Offer",
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
    )
    .unwrap()
    .with_banner("https://files.example.com/eid-banner.png");

    assert!(p.is_running(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()));
    assert!(!p.is_running(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));
}

#[test]
fn test_notification_channels_serialize_snake_case() {
    let n = Notification::new(
        "staff@agency.pk",
        "New lead",
        "Lead 2506001 assigned to you",
        NotificationChannel::WhatsApp,
    );
    let json = serde_json::to_string(&n).unwrap();
    assert!(json.contains("\"whats_app\""));
}
