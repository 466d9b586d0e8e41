//! Basic deduction calculation functionality.
//!
//! This module evaluates the four-tier basic deduction step function of
//! the monthly salary: a flat amount below a threshold, two decreasing
//! flat amounts in intermediate bands, and zero above the top threshold.

use rust_decimal::Decimal;

use crate::config::ScheduleConfig;
use crate::models::AuditStep;

/// The result of a basic deduction lookup.
#[derive(Debug, Clone)]
pub struct BasicDeductionResult {
    /// The deduction amount in whole yen.
    pub amount: Decimal,
    /// The index of the matched tier.
    pub tier_index: usize,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Calculates the basic deduction for a monthly salary.
///
/// Tiers are evaluated first-match against their exclusive upper bounds.
///
/// # Arguments
///
/// * `taxable_amount` - The monthly salary after social-insurance deductions
/// * `schedule` - The withholding schedule containing the tier table
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_basic_deduction;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let schedule = ConfigLoader::load("config/jp2024").unwrap().into_config();
/// let result = calculate_basic_deduction(Decimal::from(250_000), &schedule, 1);
/// assert_eq!(result.amount, Decimal::from(40_000));
/// ```
pub fn calculate_basic_deduction(
    taxable_amount: Decimal,
    schedule: &ScheduleConfig,
    step_number: u32,
) -> BasicDeductionResult {
    let tiers = &schedule.deductions().basic;

    let (tier_index, amount) = tiers
        .iter()
        .enumerate()
        .find(|(_, t)| t.upper_bound.is_none_or(|upper| taxable_amount < upper))
        .map(|(i, t)| (i, t.amount))
        .unwrap_or((0, Decimal::ZERO));

    let audit_step = AuditStep {
        step_number,
        rule_id: "basic_deduction".to_string(),
        rule_name: "Basic Deduction".to_string(),
        table_ref: "Table 3".to_string(),
        input: serde_json::json!({
            "taxable_amount": taxable_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string(),
            "tier": tier_index + 1
        }),
        reasoning: format!(
            "Salary {} falls in basic deduction tier {}: {}",
            taxable_amount.normalize(),
            tier_index + 1,
            amount.normalize()
        ),
    };

    BasicDeductionResult {
        amount,
        tier_index,
        audit_step,
    }
}
