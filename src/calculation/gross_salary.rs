//! Gross salary calculation functionality.
//!
//! This module converts net working minutes and an hourly wage into a
//! gross salary in whole yen.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::AuditStep;

/// The result of a gross salary calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct GrossSalaryResult {
    /// The gross salary in whole yen.
    pub amount: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the gross salary for a period.
///
/// The salary is `floor(minutes * hourly_wage / 60)`: the per-minute
/// fractional wage is carried in decimal arithmetic and the result is
/// truncated ONCE, at the end. Flooring intermediate per-minute pay would
/// diverge for wages that are not a multiple of 60 and must not be done.
///
/// Non-positive minutes or wage yield `0`.
///
/// # Arguments
///
/// * `minutes` - Net working minutes for the period
/// * `hourly_wage` - The hourly wage in yen
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_gross_salary;
/// use rust_decimal::Decimal;
///
/// let result = calculate_gross_salary(60, Decimal::from(1000), 1);
/// assert_eq!(result.amount, 1000);
///
/// // 50 minutes at 1000/h: 50000 / 60 = 833.33... -> 833
/// let result = calculate_gross_salary(50, Decimal::from(1000), 1);
/// assert_eq!(result.amount, 833);
/// ```
pub fn calculate_gross_salary(
    minutes: i64,
    hourly_wage: Decimal,
    step_number: u32,
) -> GrossSalaryResult {
    let (amount, reasoning) = if minutes <= 0 || hourly_wage <= Decimal::ZERO {
        (
            0,
            format!(
                "No pay: minutes {} and hourly wage {} must both be positive",
                minutes,
                hourly_wage.normalize()
            ),
        )
    } else {
        let salary = (Decimal::from(minutes) * hourly_wage / Decimal::from(60)).floor();
        let amount = salary.to_i64().unwrap_or(0);
        (
            amount,
            format!(
                "{} minutes x {}/h / 60 = {} (truncated to whole yen)",
                minutes,
                hourly_wage.normalize(),
                amount
            ),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        table_ref: "-".to_string(),
        input: serde_json::json!({
            "minutes": minutes,
            "hourly_wage": hourly_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount
        }),
        reasoning,
    };

    GrossSalaryResult { amount, audit_step }
}
