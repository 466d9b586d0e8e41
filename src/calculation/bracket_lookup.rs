//! Primary tax bracket lookup functionality.
//!
//! This module selects the progressive bracket for a taxable income and
//! applies its linear formula. Bracket selection is by inclusive upper
//! bound, first match wins; the bands are non-overlapping and exhaustive
//! up to infinity.

use rust_decimal::Decimal;

use crate::config::ScheduleConfig;
use crate::models::AuditStep;

/// The result of a bracket lookup, before final rounding.
#[derive(Debug, Clone)]
pub struct BracketLookupResult {
    /// The unrounded tax amount, never negative.
    pub tax: Decimal,
    /// The index of the matched bracket.
    pub bracket_index: usize,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Applies the primary progressive bracket table to a taxable income.
///
/// The matched bracket contributes `income * rate - subtraction`,
/// floored at zero. Final rounding is the caller's concern: the two
/// withholding categories round differently.
///
/// # Arguments
///
/// * `taxable_income` - Taxable income after all deductions, non-negative
/// * `schedule` - The withholding schedule containing the bracket table
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::lookup_primary_bracket;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = ConfigLoader::load("config/jp2024").unwrap().into_config();
/// let result = lookup_primary_bracket(Decimal::from(100_000), &schedule, 1);
/// assert_eq!(result.tax, Decimal::from_str("5105").unwrap());
/// ```
pub fn lookup_primary_bracket(
    taxable_income: Decimal,
    schedule: &ScheduleConfig,
    step_number: u32,
) -> BracketLookupResult {
    let brackets = &schedule.brackets().primary;

    let (bracket_index, bracket) = brackets
        .iter()
        .enumerate()
        .find(|(_, b)| b.upper_bound.is_none_or(|upper| taxable_income <= upper))
        .map(|(i, b)| (i, Some(b)))
        .unwrap_or((0, None));

    let Some(bracket) = bracket else {
        return BracketLookupResult {
            tax: Decimal::ZERO,
            bracket_index: 0,
            audit_step: AuditStep {
                step_number,
                rule_id: "tax_bracket".to_string(),
                rule_name: "Tax Bracket Lookup".to_string(),
                table_ref: "Table 4".to_string(),
                input: serde_json::json!({
                    "taxable_income": taxable_income.normalize().to_string()
                }),
                output: serde_json::json!({ "tax": "0" }),
                reasoning: "No bracket matched; empty table yields no tax".to_string(),
            },
        };
    };

    let tax = (taxable_income * bracket.rate - bracket.subtraction).max(Decimal::ZERO);

    let audit_step = AuditStep {
        step_number,
        rule_id: "tax_bracket".to_string(),
        rule_name: "Tax Bracket Lookup".to_string(),
        table_ref: "Table 4".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "tax": tax.normalize().to_string(),
            "bracket": bracket_index + 1,
            "rate": bracket.rate.normalize().to_string(),
            "subtraction": bracket.subtraction.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} - {} = {} (bracket {})",
            taxable_income.normalize(),
            bracket.rate.normalize(),
            bracket.subtraction.normalize(),
            tax.normalize(),
            bracket_index + 1
        ),
    };

    BracketLookupResult {
        tax,
        bracket_index,
        audit_step,
    }
}
