//! Verification override lookup functionality.
//!
//! The general primary-category formula approximates the published
//! stepped monthly table; the override table pins a handful of rows
//! where the published values must be reproduced exactly. Overrides
//! apply only to primary-category staff with zero declared dependents
//! and take absolute precedence over the general formula.

use rust_decimal::Decimal;

use crate::config::ScheduleConfig;
use crate::models::AuditStep;

/// A matched override band.
#[derive(Debug, Clone)]
pub struct OverrideMatch {
    /// The literal tax amount from the published table.
    pub tax: Decimal,
    /// The index of the matched band.
    pub band_index: usize,
    /// The audit step recording this match.
    pub audit_step: AuditStep,
}

/// Looks up the verification override table.
///
/// Returns `Some` when `dependent_count` is zero and `taxable_amount`
/// falls into one of the closed-open override bands; the caller must
/// return the matched tax value immediately, bypassing the general
/// formula.
///
/// # Arguments
///
/// * `taxable_amount` - The monthly salary after social-insurance deductions
/// * `dependent_count` - Number of declared dependents
/// * `schedule` - The withholding schedule containing the override table
/// * `step_number` - The step number for audit trail sequencing
pub fn find_override(
    taxable_amount: Decimal,
    dependent_count: u32,
    schedule: &ScheduleConfig,
    step_number: u32,
) -> Option<OverrideMatch> {
    if dependent_count != 0 {
        return None;
    }

    let (band_index, band) = schedule
        .overrides()
        .zero_dependents
        .iter()
        .enumerate()
        .find(|(_, b)| b.lower_bound <= taxable_amount && taxable_amount < b.upper_bound)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "verification_override".to_string(),
        rule_name: "Verification Override".to_string(),
        table_ref: "Monthly Table".to_string(),
        input: serde_json::json!({
            "taxable_amount": taxable_amount.normalize().to_string(),
            "dependent_count": dependent_count
        }),
        output: serde_json::json!({
            "tax": band.tax.normalize().to_string(),
            "band": band_index + 1
        }),
        reasoning: format!(
            "Amount {} falls in published-table band [{}, {}): tax {}",
            taxable_amount.normalize(),
            band.lower_bound.normalize(),
            band.upper_bound.normalize(),
            band.tax.normalize()
        ),
    };

    Some(OverrideMatch {
        tax: band.tax,
        band_index,
        audit_step,
    })
}
