//! Counter names and the document-numbering policy
//!
//! Human-readable document numbers (lead and quotation numbers) are composed
//! from the issuance date and a per-family serial: `YYMM` followed by the
//! serial zero-padded to three digits. The serial component widens naturally
//! past 999; there is no truncation and no reset across month or year
//! boundaries. Finance exports rely on this exact format.
//!
//! The serial itself comes from the persisted counter store (see the
//! database layer); this module only owns the pure formatting half and the
//! canonical counter names, so the two document families cannot drift onto
//! a shared sequence by typo.

use chrono::Datelike;

/// Canonical counter names, one per document family.
///
/// Each family has an independent numbering space. Free-form names are
/// accepted by the counter store, but all issuing code paths go through
/// these constants.
pub mod counter_names {
    /// Serial counter for lead numbers
    pub const LEAD: &str = "lead";
    /// Serial counter for quotation numbers
    pub const QUOTATION: &str = "quotation";
}

/// Formats a document number from the issuance date and a serial.
///
/// Deterministic pure function: `YY` is the last two digits of the year,
/// `MM` the zero-padded month, and the serial is zero-padded to width 3,
/// growing naturally for serials of 1000 and above.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use core_kernel::numbering::format_document_number;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
/// assert_eq!(format_document_number(date, 8), "2506008");
/// ```
pub fn format_document_number(date: impl Datelike, serial: i64) -> String {
    let yy = date.year().rem_euclid(100);
    format!("{:02}{:02}{:03}", yy, date.month(), serial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn june_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_quotation_number_scenario() {
        // Counter at 7 issues serial 8 next
        assert_eq!(format_document_number(june_2025(), 8), "2506008");
    }

    #[test]
    fn test_serial_pads_to_three_digits() {
        assert_eq!(format_document_number(june_2025(), 1), "2506001");
        assert_eq!(format_document_number(june_2025(), 999), "2506999");
    }

    #[test]
    fn test_serial_widens_past_999() {
        assert_eq!(format_document_number(june_2025(), 1000), "25061000");
        assert_eq!(format_document_number(june_2025(), 12345), "250612345");
    }

    #[test]
    fn test_month_is_zero_padded() {
        let jan = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(format_document_number(jan, 42), "2601042");
    }

    #[test]
    fn test_year_wraps_to_two_digits() {
        let y2100 = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
        assert_eq!(format_document_number(y2100, 5), "0012005");
    }

    #[test]
    fn test_counter_names_are_distinct() {
        assert_ne!(counter_names::LEAD, counter_names::QUOTATION);
    }
}
