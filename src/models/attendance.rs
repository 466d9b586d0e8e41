//! Attendance models.
//!
//! This module defines the raw attendance event record and the WorkSession
//! and BreakSpan structs that a day's events are grouped into.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calculation::calculate_net_working_minutes;

/// The kind of a raw attendance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Start of a paid working span.
    ClockIn,
    /// Start of an unpaid break within a working span.
    BreakStart,
    /// End of an unpaid break.
    BreakEnd,
    /// End of a paid working span.
    ClockOut,
}

/// A raw attendance event as recorded by the time clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// The staff member the event belongs to.
    pub staff_id: String,
    /// The kind of event.
    pub kind: EventKind,
    /// When the event was recorded.
    pub timestamp: NaiveDateTime,
}

/// An unpaid break within a work session.
///
/// A break whose end is missing is incomplete and contributes zero
/// minutes; it is never treated as running to the present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakSpan {
    /// The start of the break.
    pub start: NaiveDateTime,
    /// The end of the break, absent while the break is open.
    pub end: Option<NaiveDateTime>,
}

impl BreakSpan {
    /// Returns the whole minutes of this break, zero when incomplete.
    pub fn minutes(&self) -> i64 {
        calculate_net_working_minutes(self.start, self.end)
    }
}

/// A single paid working span with its unpaid breaks.
///
/// A session whose clock-out is missing (still in progress, or the staff
/// member forgot to clock out) yields zero paid minutes; the engine never
/// substitutes the current wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// The clock-in time.
    pub clock_in: NaiveDateTime,
    /// The clock-out time, absent while the session is open.
    pub clock_out: Option<NaiveDateTime>,
    /// Unpaid breaks taken during the session.
    #[serde(default)]
    pub breaks: Vec<BreakSpan>,
}

impl WorkSession {
    /// Calculates the net paid minutes for the session.
    ///
    /// The clock span and each break span are truncated to whole minutes
    /// independently, then completed break minutes are subtracted from the
    /// clock span. The result is never negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::WorkSession;
    /// use chrono::NaiveDateTime;
    ///
    /// let session = WorkSession {
    ///     clock_in: NaiveDateTime::parse_from_str("2024-06-03 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     clock_out: Some(NaiveDateTime::parse_from_str("2024-06-03 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap()),
    ///     breaks: vec![],
    /// };
    /// assert_eq!(session.net_minutes(), 480);
    /// ```
    pub fn net_minutes(&self) -> i64 {
        if self.clock_out.is_none() {
            return 0;
        }

        let worked = calculate_net_working_minutes(self.clock_in, self.clock_out);
        let break_minutes: i64 = self.breaks.iter().map(|b| b.minutes()).sum();

        (worked - break_minutes).max(0)
    }
}
