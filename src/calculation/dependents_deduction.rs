//! Dependents deduction calculation functionality.
//!
//! This module applies the fixed per-head monthly deduction for declared
//! dependents. Only the primary withholding category uses it.

use rust_decimal::Decimal;

use crate::config::ScheduleConfig;
use crate::models::AuditStep;

/// The result of a dependents deduction calculation.
#[derive(Debug, Clone)]
pub struct DependentsDeductionResult {
    /// The deduction amount in whole yen.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the dependents deduction.
///
/// The deduction is a fixed per-head amount multiplied by the declared
/// dependent count. No cap is enforced here; the caller is responsible
/// for the plausibility of the count.
///
/// # Arguments
///
/// * `dependent_count` - Number of qualifying dependents declared
/// * `schedule` - The withholding schedule containing the per-head amount
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_dependents_deduction;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let schedule = ConfigLoader::load("config/jp2024").unwrap().into_config();
/// let result = calculate_dependents_deduction(2, &schedule, 1);
/// assert_eq!(result.amount, Decimal::from(63_334));
/// ```
pub fn calculate_dependents_deduction(
    dependent_count: u32,
    schedule: &ScheduleConfig,
    step_number: u32,
) -> DependentsDeductionResult {
    let per_head = schedule.deductions().dependents_per_head;
    let amount = per_head * Decimal::from(dependent_count);

    let audit_step = AuditStep {
        step_number,
        rule_id: "dependents_deduction".to_string(),
        rule_name: "Dependents Deduction".to_string(),
        table_ref: "Table 2".to_string(),
        input: serde_json::json!({
            "dependent_count": dependent_count,
            "per_head": per_head.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} dependents x {} = {}",
            dependent_count,
            per_head.normalize(),
            amount.normalize()
        ),
    };

    DependentsDeductionResult { amount, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn load_schedule() -> ScheduleConfig {
        ConfigLoader::load("./config/jp2024").unwrap().into_config()
    }

    /// DD-001: zero dependents, zero deduction
    #[test]
    fn test_zero_dependents_zero_deduction() {
        let schedule = load_schedule();
        let result = calculate_dependents_deduction(0, &schedule, 1);
        assert_eq!(result.amount, Decimal::ZERO);
    }

    /// DD-002: one dependent
    #[test]
    fn test_one_dependent() {
        let schedule = load_schedule();
        let result = calculate_dependents_deduction(1, &schedule, 1);
        assert_eq!(result.amount, dec("31667"));
    }

    /// DD-003: three dependents
    #[test]
    fn test_three_dependents() {
        let schedule = load_schedule();
        let result = calculate_dependents_deduction(3, &schedule, 1);
        assert_eq!(result.amount, dec("95001"));
    }

    /// DD-004: no cap is enforced
    #[test]
    fn test_no_cap_enforced() {
        let schedule = load_schedule();
        let result = calculate_dependents_deduction(10, &schedule, 1);
        assert_eq!(result.amount, dec("316670"));
    }

    #[test]
    fn test_audit_step_records_count() {
        let schedule = load_schedule();
        let result = calculate_dependents_deduction(2, &schedule, 6);

        assert_eq!(result.audit_step.step_number, 6);
        assert_eq!(result.audit_step.rule_id, "dependents_deduction");
        assert_eq!(result.audit_step.input["dependent_count"], 2);
        assert!(result.audit_step.reasoning.contains("63334"));
    }
}
