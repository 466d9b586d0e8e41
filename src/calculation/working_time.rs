//! Working-time primitives.
//!
//! This module provides the pairwise net-minutes primitive used for both
//! clock spans and break spans, and the display-hours helper used for
//! timesheet presentation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Calculates the net working minutes between two instants.
///
/// The whole-second difference is truncated down to whole minutes: the
/// sub-minute remainder is dropped, never rounded, so staff are paid for
/// fully completed minutes only.
///
/// # Arguments
///
/// * `start` - The start of the span
/// * `end` - The end of the span, absent while the span is open
///
/// # Behavior
///
/// - An absent `end` yields `0`; the current wall-clock time is never
///   substituted.
/// - An inverted pair (`end` before `start`, from clock skew or a data
///   error) yields `0`, never a negative duration.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_net_working_minutes;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2024-06-03 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-06-03 09:05:59", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// assert_eq!(calculate_net_working_minutes(start, Some(end)), 5);
/// assert_eq!(calculate_net_working_minutes(start, None), 0);
/// ```
pub fn calculate_net_working_minutes(start: NaiveDateTime, end: Option<NaiveDateTime>) -> i64 {
    let Some(end) = end else {
        return 0;
    };

    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        return 0;
    }

    seconds / 60
}

/// Converts net minutes to a two-decimal hour figure for display.
///
/// The figure is truncated at the hundredths place, not rounded:
/// `floor((minutes / 60) * 100) / 100`. Display only; pay is always
/// computed from minutes.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::display_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(display_hours(125), Decimal::from_str("2.08").unwrap());
/// assert_eq!(display_hours(90), Decimal::from_str("1.50").unwrap());
/// ```
pub fn display_hours(minutes: i64) -> Decimal {
    if minutes <= 0 {
        return Decimal::ZERO;
    }

    let hours = Decimal::from(minutes) / Decimal::from(60);
    ((hours * Decimal::ONE_HUNDRED).floor() / Decimal::ONE_HUNDRED).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// WT-001: absent end yields zero
    #[test]
    fn test_absent_end_yields_zero() {
        let start = make_datetime("2024-06-03", "09:00:00");
        assert_eq!(calculate_net_working_minutes(start, None), 0);
    }

    /// WT-002: inverted pair yields zero
    #[test]
    fn test_inverted_pair_yields_zero() {
        let start = make_datetime("2024-06-03", "17:00:00");
        let end = make_datetime("2024-06-03", "09:00:00");
        assert_eq!(calculate_net_working_minutes(start, Some(end)), 0);
    }

    /// WT-003: sub-minute remainder is dropped
    #[test]
    fn test_sub_minute_remainder_is_dropped() {
        let start = make_datetime("2024-06-03", "09:00:00");

        let end = make_datetime("2024-06-03", "09:00:59");
        assert_eq!(calculate_net_working_minutes(start, Some(end)), 0);

        let end = make_datetime("2024-06-03", "09:01:00");
        assert_eq!(calculate_net_working_minutes(start, Some(end)), 1);

        let end = make_datetime("2024-06-03", "09:01:59");
        assert_eq!(calculate_net_working_minutes(start, Some(end)), 1);
    }

    /// WT-004: exact spans
    #[test]
    fn test_exact_spans() {
        let start = make_datetime("2024-06-03", "09:00:00");

        let end = make_datetime("2024-06-03", "10:00:00");
        assert_eq!(calculate_net_working_minutes(start, Some(end)), 60);

        let end = make_datetime("2024-06-03", "17:30:00");
        assert_eq!(calculate_net_working_minutes(start, Some(end)), 510);
    }

    /// WT-005: zero-length span
    #[test]
    fn test_zero_length_span() {
        let start = make_datetime("2024-06-03", "09:00:00");
        assert_eq!(calculate_net_working_minutes(start, Some(start)), 0);
    }

    /// WT-006: span crossing midnight
    #[test]
    fn test_span_crossing_midnight() {
        let start = make_datetime("2024-06-03", "23:30:00");
        let end = make_datetime("2024-06-04", "00:30:00");
        assert_eq!(calculate_net_working_minutes(start, Some(end)), 60);
    }

    /// DH-001: display hours truncate at the hundredths place
    #[test]
    fn test_display_hours_truncates() {
        // 125 minutes = 2.0833... hours
        assert_eq!(display_hours(125), dec("2.08"));
        // 59 minutes = 0.9833... hours
        assert_eq!(display_hours(59), dec("0.98"));
        // 119 minutes = 1.9833... hours, would round to 1.99
        assert_eq!(display_hours(119), dec("1.98"));
    }

    /// DH-002: exact fractions are unchanged
    #[test]
    fn test_display_hours_exact_fractions() {
        assert_eq!(display_hours(90), dec("1.5"));
        assert_eq!(display_hours(60), dec("1"));
        assert_eq!(display_hours(480), dec("8"));
    }

    /// DH-003: zero and negative minutes display as zero
    #[test]
    fn test_display_hours_zero_and_negative() {
        assert_eq!(display_hours(0), Decimal::ZERO);
        assert_eq!(display_hours(-30), Decimal::ZERO);
    }
}
