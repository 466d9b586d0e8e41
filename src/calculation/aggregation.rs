//! Attendance event aggregation.
//!
//! This module groups a staff member's raw attendance events into ordered
//! work sessions (`clock_in -> [break_start -> break_end]* -> clock_out`).
//! Aggregation is total: orphan events and unmatched break starts are
//! tolerated and simply contribute zero paid time, because payroll must
//! never fail on a single bad record.

use crate::models::{AttendanceEvent, BreakSpan, EventKind, WorkSession};

/// Groups raw attendance events into work sessions.
///
/// Events are sorted by timestamp and scanned in order:
/// - `ClockIn` opens a new session. A session still open at the next
///   `ClockIn` is kept with an absent clock-out (it yields zero minutes).
/// - `BreakStart` opens a break within the current session; a `BreakStart`
///   outside a session is dropped.
/// - `BreakEnd` closes the open break; without an open break it is dropped.
/// - `ClockOut` closes the current session; without an open session it is
///   dropped. A break still open at clock-out stays incomplete and
///   contributes zero minutes.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::build_work_sessions;
/// use payroll_engine::models::{AttendanceEvent, EventKind};
/// use chrono::NaiveDateTime;
///
/// let ts = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let events = vec![
///     AttendanceEvent { staff_id: "s1".into(), kind: EventKind::ClockIn, timestamp: ts("2024-06-03 09:00:00") },
///     AttendanceEvent { staff_id: "s1".into(), kind: EventKind::ClockOut, timestamp: ts("2024-06-03 17:00:00") },
/// ];
///
/// let sessions = build_work_sessions(&events);
/// assert_eq!(sessions.len(), 1);
/// assert_eq!(sessions[0].net_minutes(), 480);
/// ```
pub fn build_work_sessions(events: &[AttendanceEvent]) -> Vec<WorkSession> {
    let mut ordered: Vec<&AttendanceEvent> = events.iter().collect();
    ordered.sort_by_key(|e| e.timestamp);

    let mut sessions: Vec<WorkSession> = Vec::new();
    let mut current: Option<WorkSession> = None;
    let mut open_break: Option<BreakSpan> = None;

    for event in ordered {
        match event.kind {
            EventKind::ClockIn => {
                // An unclosed previous session is kept as-is; it pays zero.
                if let Some(session) = current.take() {
                    sessions.push(finish_session(session, open_break.take()));
                }
                current = Some(WorkSession {
                    clock_in: event.timestamp,
                    clock_out: None,
                    breaks: Vec::new(),
                });
            }
            EventKind::BreakStart => {
                if current.is_some() && open_break.is_none() {
                    open_break = Some(BreakSpan {
                        start: event.timestamp,
                        end: None,
                    });
                }
            }
            EventKind::BreakEnd => {
                if let Some(mut span) = open_break.take() {
                    span.end = Some(event.timestamp);
                    if let Some(session) = current.as_mut() {
                        session.breaks.push(span);
                    }
                }
            }
            EventKind::ClockOut => {
                if let Some(mut session) = current.take() {
                    session.clock_out = Some(event.timestamp);
                    sessions.push(finish_session(session, open_break.take()));
                }
            }
        }
    }

    if let Some(session) = current.take() {
        sessions.push(finish_session(session, open_break.take()));
    }

    sessions
}

/// Attaches a still-open break to its session before the session is emitted.
fn finish_session(mut session: WorkSession, open_break: Option<BreakSpan>) -> WorkSession {
    if let Some(span) = open_break {
        session.breaks.push(span);
    }
    session
}
