//! Calculation logic for the payroll engine.
//!
//! This module contains all the calculation functions for deriving pay
//! and tax, including the working-time primitives, attendance event
//! aggregation, gross salary conversion, the three deduction tables,
//! the verification override table, the progressive bracket lookup, and
//! the category-dispatched withholding tax calculation.

mod aggregation;
mod basic_deduction;
mod bracket_lookup;
mod dependents_deduction;
mod employment_deduction;
mod gross_salary;
mod override_table;
mod withholding;
mod working_time;

pub use aggregation::build_work_sessions;
pub use basic_deduction::{BasicDeductionResult, calculate_basic_deduction};
pub use bracket_lookup::{BracketLookupResult, lookup_primary_bracket};
pub use dependents_deduction::{DependentsDeductionResult, calculate_dependents_deduction};
pub use employment_deduction::{EmploymentDeductionResult, calculate_employment_deduction};
pub use gross_salary::{GrossSalaryResult, calculate_gross_salary};
pub use override_table::{OverrideMatch, find_override};
pub use withholding::{WithholdingResult, calculate_income_tax};
pub use working_time::{calculate_net_working_minutes, display_hours};
