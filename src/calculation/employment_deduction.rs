//! Employment-income deduction calculation functionality.
//!
//! This module evaluates the five-tier piecewise-linear employment-income
//! deduction from the monthly machine-calculation table.

use rust_decimal::Decimal;

use crate::config::ScheduleConfig;
use crate::models::AuditStep;

/// The result of an employment-income deduction lookup.
#[derive(Debug, Clone)]
pub struct EmploymentDeductionResult {
    /// The deduction amount in whole yen.
    pub amount: Decimal,
    /// The index of the matched tier.
    pub tier_index: usize,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Calculates the employment-income deduction for a monthly salary.
///
/// Tiers are evaluated first-match against their exclusive upper bounds:
/// a fixed deduction below the lowest threshold, three linear
/// `salary * rate + offset` bands, and a fixed deduction above the top
/// threshold. Linear tiers are rounded UP to the next whole yen — the
/// ceiling is statutory and must never be replaced by floor or
/// round-to-nearest.
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
/// use payroll_engine::calculation::calculate_employment_deduction;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let schedule = ConfigLoader::load("config/jp2024").unwrap().into_config();
/// let result = calculate_employment_deduction(Decimal::from(100_000), &schedule, 1);
/// assert_eq!(result.amount, Decimal::from(45_834));
/// ```
pub fn calculate_employment_deduction(
    taxable_amount: Decimal,
    schedule: &ScheduleConfig,
    step_number: u32,
) -> EmploymentDeductionResult {
    let tiers = &schedule.deductions().employment;

    // The validated table always ends in an open-ended tier, so a match exists.
    let matched = tiers
        .iter()
        .enumerate()
        .find(|(_, t)| t.upper_bound.is_none_or(|upper| taxable_amount < upper));

    let Some((tier_index, tier)) = matched else {
        return EmploymentDeductionResult {
            amount: Decimal::ZERO,
            tier_index: 0,
            audit_step: AuditStep {
                step_number,
                rule_id: "employment_deduction".to_string(),
                rule_name: "Employment Income Deduction".to_string(),
                table_ref: "Table 1".to_string(),
                input: serde_json::json!({
                    "taxable_amount": taxable_amount.normalize().to_string()
                }),
                output: serde_json::json!({ "amount": "0" }),
                reasoning: "No tier matched; empty table yields no deduction".to_string(),
            },
        };
    };

    let (amount, reasoning) = match tier.rate {
        Some(rate) => {
            let amount = (taxable_amount * rate + tier.offset).ceil();
            (
                amount,
                format!(
                    "{} x {} + {} = {} (rounded up to whole yen)",
                    taxable_amount.normalize(),
                    rate.normalize(),
                    tier.offset.normalize(),
                    amount.normalize()
                ),
            )
        }
        None => (
            tier.offset,
            format!(
                "Flat deduction {} for tier {}",
                tier.offset.normalize(),
                tier_index + 1
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "employment_deduction".to_string(),
        rule_name: "Employment Income Deduction".to_string(),
        table_ref: "Table 1".to_string(),
        input: serde_json::json!({
            "taxable_amount": taxable_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string(),
            "tier": tier_index + 1
        }),
        reasoning,
    };

    EmploymentDeductionResult {
        amount,
        tier_index,
        audit_step,
    }
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

    /// ED-001: flat deduction below the low threshold
    #[test]
    fn test_flat_deduction_below_low_threshold() {
        let schedule = load_schedule();

        let result = calculate_employment_deduction(dec("100000"), &schedule, 1);
        assert_eq!(result.amount, dec("45834"));
        assert_eq!(result.tier_index, 0);

        let result = calculate_employment_deduction(dec("135416"), &schedule, 1);
        assert_eq!(result.amount, dec("45834"));
    }

    /// ED-002: first linear tier starts at the threshold
    #[test]
    fn test_first_linear_tier_boundary() {
        let schedule = load_schedule();

        // 135417 x 0.40 - 8333 = 45833.8 -> ceiling 45834
        let result = calculate_employment_deduction(dec("135417"), &schedule, 1);
        assert_eq!(result.amount, dec("45834"));
        assert_eq!(result.tier_index, 1);

        // 140000 x 0.40 - 8333 = 47667
        let result = calculate_employment_deduction(dec("140000"), &schedule, 1);
        assert_eq!(result.amount, dec("47667"));
    }

    /// ED-003: ceiling, never floor
    #[test]
    fn test_ceiling_is_applied() {
        let schedule = load_schedule();

        // 145223 x 0.40 - 8333 = 49756.2 -> 49757, floor would give 49756
        let result = calculate_employment_deduction(dec("145223"), &schedule, 1);
        assert_eq!(result.amount, dec("49757"));
    }

    /// ED-004: middle linear tiers
    #[test]
    fn test_middle_linear_tiers() {
        let schedule = load_schedule();

        // 150000 x 0.30 + 6667 = 51667
        let result = calculate_employment_deduction(dec("150000"), &schedule, 1);
        assert_eq!(result.amount, dec("51667"));
        assert_eq!(result.tier_index, 2);

        // 299999 x 0.30 + 6667 = 96666.7 -> 96667
        let result = calculate_employment_deduction(dec("299999"), &schedule, 1);
        assert_eq!(result.amount, dec("96667"));

        // 300000 x 0.20 + 36667 = 96667
        let result = calculate_employment_deduction(dec("300000"), &schedule, 1);
        assert_eq!(result.amount, dec("96667"));
        assert_eq!(result.tier_index, 3);

        // 549999 x 0.20 + 36667 = 146666.8 -> 146667
        let result = calculate_employment_deduction(dec("549999"), &schedule, 1);
        assert_eq!(result.amount, dec("146667"));
    }

    /// ED-005: flat cap above the high threshold
    #[test]
    fn test_flat_cap_above_high_threshold() {
        let schedule = load_schedule();

        let result = calculate_employment_deduction(dec("550000"), &schedule, 1);
        assert_eq!(result.amount, dec("162500"));
        assert_eq!(result.tier_index, 4);

        let result = calculate_employment_deduction(dec("3000000"), &schedule, 1);
        assert_eq!(result.amount, dec("162500"));
    }

    #[test]
    fn test_audit_step_records_tier() {
        let schedule = load_schedule();
        let result = calculate_employment_deduction(dec("200000"), &schedule, 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "employment_deduction");
        assert_eq!(result.audit_step.table_ref, "Table 1");
        assert_eq!(result.audit_step.output["tier"], 3);
    }
}
