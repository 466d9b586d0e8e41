//! Payroll orchestration.
//!
//! This module chains the calculation steps for one staff member into a
//! [`PayStatement`] and maps the chain over a roster for batch runs.
//! Every underlying step is a pure function of its inputs, so entries in
//! a batch are fully independent and a run can be parallelized across
//! staff without coordination.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_gross_salary, calculate_income_tax, display_hours,
};
use crate::config::ScheduleConfig;
use crate::models::{AuditStep, PayStatement, StaffMember, WorkSession};

/// One roster entry of a payroll run.
#[derive(Debug, Clone)]
pub struct PayrollEntry {
    /// The staff member to calculate pay for.
    pub staff: StaffMember,
    /// The staff member's work sessions for the period.
    pub sessions: Vec<WorkSession>,
}

/// Calculates a pay statement for one staff member and period.
///
/// The data flows one direction: sessions -> net minutes -> gross salary
/// -> taxable amount -> withheld tax. The taxable amount is the gross
/// salary minus the declared social-insurance deduction, floored at zero.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::StaffMember;
/// use payroll_engine::payroll::calculate_pay_statement;
/// use rust_decimal::Decimal;
///
/// let schedule = ConfigLoader::load("config/jp2024").unwrap().into_config();
/// let staff = StaffMember {
///     id: "staff_001".to_string(),
///     hourly_wage: Decimal::from(1200),
///     withholding_category: Default::default(),
///     dependent_count: 0,
///     social_insurance_deduction: 0,
/// };
///
/// let statement = calculate_pay_statement(&staff, &[], &schedule);
/// assert_eq!(statement.gross_salary, 0);
/// ```
pub fn calculate_pay_statement(
    staff: &StaffMember,
    sessions: &[WorkSession],
    schedule: &ScheduleConfig,
) -> PayStatement {
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let net_minutes: i64 = sessions.iter().map(|s| s.net_minutes()).sum();
    let worked_hours = display_hours(net_minutes);

    let gross = calculate_gross_salary(net_minutes, staff.hourly_wage, step_number);
    audit_steps.push(gross.audit_step);
    step_number += 1;

    let social_insurance = staff.social_insurance_deduction.max(0);
    let taxable_amount = (gross.amount - social_insurance).max(0);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "taxable_amount".to_string(),
        rule_name: "Taxable Amount".to_string(),
        table_ref: "-".to_string(),
        input: serde_json::json!({
            "gross_salary": gross.amount,
            "social_insurance_deduction": social_insurance
        }),
        output: serde_json::json!({
            "taxable_amount": taxable_amount
        }),
        reasoning: format!(
            "{} - {} = {} (floored at 0)",
            gross.amount, social_insurance, taxable_amount
        ),
    });
    step_number += 1;

    let withholding = calculate_income_tax(
        taxable_amount.into(),
        staff.dependent_count,
        staff.withholding_category,
        schedule,
        step_number,
    );
    audit_steps.extend(withholding.audit_steps);

    let net_pay = taxable_amount - withholding.tax_amount;

    PayStatement {
        id: Uuid::new_v4(),
        staff_id: staff.id.clone(),
        net_minutes,
        worked_hours,
        gross_salary: gross.amount,
        taxable_amount,
        income_tax: withholding.tax_amount,
        net_pay,
        category: staff.withholding_category,
        audit_steps,
        calculated_at: Utc::now(),
    }
}

/// Calculates pay statements for a whole roster.
///
/// Entries are independent; a statement that comes out with zero paid
/// minutes (open sessions, missing events) is still produced, with a
/// warning logged for follow-up.
pub fn calculate_payroll_run(
    entries: &[PayrollEntry],
    schedule: &ScheduleConfig,
) -> Vec<PayStatement> {
    let run_id = Uuid::new_v4();
    let started = Instant::now();
    info!(run_id = %run_id, staff_count = entries.len(), "Starting payroll run");

    let statements: Vec<PayStatement> = entries
        .iter()
        .map(|entry| {
            let statement = calculate_pay_statement(&entry.staff, &entry.sessions, schedule);
            if statement.net_minutes == 0 && !entry.sessions.is_empty() {
                warn!(
                    run_id = %run_id,
                    staff_id = %entry.staff.id,
                    sessions = entry.sessions.len(),
                    "Sessions present but no paid minutes"
                );
            }
            statement
        })
        .collect();

    let total_gross: i64 = statements.iter().map(|s| s.gross_salary).sum();
    let total_tax: i64 = statements.iter().map(|s| s.income_tax).sum();
    info!(
        run_id = %run_id,
        staff_count = statements.len(),
        total_gross,
        total_tax,
        duration_us = started.elapsed().as_micros() as u64,
        "Payroll run completed"
    );

    statements
}
