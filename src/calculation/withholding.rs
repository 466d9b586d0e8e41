//! Withholding tax calculation functionality.
//!
//! This module dispatches a taxable monthly amount to one of the two
//! category algorithms. The primary path runs the verification override
//! table, the three deductions, and the progressive bracket table, then
//! rounds to the nearest 10 yen. The secondary path applies flat-rate
//! bands to the amount itself and floors to whole yen. The two final
//! rounding policies are legally distinct and are kept as separate
//! functions selected by category, not a shared helper with a flag.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::ScheduleConfig;
use crate::models::{AuditStep, WithholdingCategory};

use super::basic_deduction::calculate_basic_deduction;
use super::bracket_lookup::lookup_primary_bracket;
use super::dependents_deduction::calculate_dependents_deduction;
use super::employment_deduction::calculate_employment_deduction;
use super::override_table::find_override;

/// The result of a withholding tax calculation.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// The withheld tax amount in whole yen, never negative.
    pub tax_amount: i64,
    /// The category the tax was calculated under.
    pub category: WithholdingCategory,
    /// Audit steps recording each stage of the calculation.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates the monthly withholding income tax.
///
/// `taxable_amount` is the salary after social-insurance-style deductions
/// are already removed by the caller. A negative amount yields zero tax.
///
/// # Arguments
///
/// * `taxable_amount` - The monthly salary after social-insurance deductions
/// * `dependent_count` - Number of qualifying dependents declared
/// * `category` - The declared withholding category
/// * `schedule` - The withholding schedule tables
/// * `step_number_start` - The starting step number for audit sequencing
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::WithholdingCategory;
/// use rust_decimal::Decimal;
///
/// let schedule = ConfigLoader::load("config/jp2024").unwrap().into_config();
///
/// // A published-table row reproduced exactly by the override table.
/// let result = calculate_income_tax(
///     Decimal::from(145_223),
///     0,
///     WithholdingCategory::Primary,
///     &schedule,
///     1,
/// );
/// assert_eq!(result.tax_amount, 2220);
/// ```
pub fn calculate_income_tax(
    taxable_amount: Decimal,
    dependent_count: u32,
    category: WithholdingCategory,
    schedule: &ScheduleConfig,
    step_number_start: u32,
) -> WithholdingResult {
    if taxable_amount < Decimal::ZERO {
        let audit_step = AuditStep {
            step_number: step_number_start,
            rule_id: "withholding_clamp".to_string(),
            rule_name: "Withholding Tax".to_string(),
            table_ref: "-".to_string(),
            input: serde_json::json!({
                "taxable_amount": taxable_amount.normalize().to_string()
            }),
            output: serde_json::json!({ "tax": 0 }),
            reasoning: "Negative taxable amount clamps to zero tax".to_string(),
        };
        return WithholdingResult {
            tax_amount: 0,
            category,
            audit_steps: vec![audit_step],
        };
    }

    match category {
        WithholdingCategory::Primary => {
            primary_withholding(taxable_amount, dependent_count, schedule, step_number_start)
        }
        WithholdingCategory::Secondary => {
            secondary_withholding(taxable_amount, schedule, step_number_start)
        }
    }
}

/// The primary-category algorithm: overrides, deductions, brackets,
/// round to the nearest 10 yen.
fn primary_withholding(
    taxable_amount: Decimal,
    dependent_count: u32,
    schedule: &ScheduleConfig,
    step_number_start: u32,
) -> WithholdingResult {
    let mut audit_steps = Vec::new();
    let mut step_number = step_number_start;

    // The override table takes absolute precedence over the formula.
    if let Some(matched) = find_override(taxable_amount, dependent_count, schedule, step_number) {
        audit_steps.push(matched.audit_step);
        return WithholdingResult {
            tax_amount: matched.tax.to_i64().unwrap_or(0),
            category: WithholdingCategory::Primary,
            audit_steps,
        };
    }

    let employment = calculate_employment_deduction(taxable_amount, schedule, step_number);
    audit_steps.push(employment.audit_step);
    step_number += 1;

    let dependents = calculate_dependents_deduction(dependent_count, schedule, step_number);
    audit_steps.push(dependents.audit_step);
    step_number += 1;

    let basic = calculate_basic_deduction(taxable_amount, schedule, step_number);
    audit_steps.push(basic.audit_step);
    step_number += 1;

    let total_deductions = employment.amount + dependents.amount + basic.amount;
    let taxable_income = (taxable_amount - total_deductions).max(Decimal::ZERO);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        table_ref: "-".to_string(),
        input: serde_json::json!({
            "taxable_amount": taxable_amount.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} = {} (floored at 0)",
            taxable_amount.normalize(),
            total_deductions.normalize(),
            taxable_income.normalize()
        ),
    });
    step_number += 1;

    let bracket = lookup_primary_bracket(taxable_income, schedule, step_number);
    audit_steps.push(bracket.audit_step);
    step_number += 1;

    let rounded = round_to_nearest_ten(bracket.tax);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "final_rounding_primary".to_string(),
        rule_name: "Final Rounding (Primary)".to_string(),
        table_ref: "-".to_string(),
        input: serde_json::json!({
            "tax": bracket.tax.normalize().to_string()
        }),
        output: serde_json::json!({
            "tax": rounded.normalize().to_string()
        }),
        reasoning: format!(
            "{} rounded to the nearest 10 yen: {}",
            bracket.tax.normalize(),
            rounded.normalize()
        ),
    });

    WithholdingResult {
        tax_amount: rounded.to_i64().unwrap_or(0),
        category: WithholdingCategory::Primary,
        audit_steps,
    }
}

/// The secondary-category algorithm: flat-rate bands over the taxable
/// amount itself, floored to whole yen. No dependents deduction and no
/// overrides, regardless of the supplied dependent count.
///
/// The mid band is a flat-rate approximation of the published stepped
/// table; replacing it with exact bracket data is an open item pending
/// an authoritative source.
fn secondary_withholding(
    taxable_amount: Decimal,
    schedule: &ScheduleConfig,
    step_number_start: u32,
) -> WithholdingResult {
    let bands = &schedule.brackets().secondary;

    let matched = bands
        .iter()
        .enumerate()
        .find(|(_, b)| b.upper_bound.is_none_or(|upper| taxable_amount < upper));

    let (band_index, raw_tax) = match matched {
        Some((i, band)) => (
            i,
            (taxable_amount * band.rate - band.subtraction).max(Decimal::ZERO),
        ),
        None => (0, Decimal::ZERO),
    };

    let floored = raw_tax.floor();

    let audit_step = AuditStep {
        step_number: step_number_start,
        rule_id: "secondary_band".to_string(),
        rule_name: "Secondary Schedule".to_string(),
        table_ref: "Monthly Table (secondary)".to_string(),
        input: serde_json::json!({
            "taxable_amount": taxable_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "tax": floored.normalize().to_string(),
            "band": band_index + 1
        }),
        reasoning: format!(
            "Band {} yields {}, floored to {}",
            band_index + 1,
            raw_tax.normalize(),
            floored.normalize()
        ),
    };

    WithholdingResult {
        tax_amount: floored.to_i64().unwrap_or(0),
        category: WithholdingCategory::Secondary,
        audit_steps: vec![audit_step],
    }
}

/// Rounds a primary-category tax amount to the nearest multiple of 10
/// yen, halves away from zero.
fn round_to_nearest_ten(tax: Decimal) -> Decimal {
    (tax / Decimal::TEN).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * Decimal::TEN
}
