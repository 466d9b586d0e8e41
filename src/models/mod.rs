//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod pay_statement;
mod staff;

pub use attendance::{AttendanceEvent, BreakSpan, EventKind, WorkSession};
pub use pay_statement::{AuditStep, PayStatement};
pub use staff::{StaffMember, WithholdingCategory};
