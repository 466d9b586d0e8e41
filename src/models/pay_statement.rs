//! Pay statement models.
//!
//! This module contains the [`PayStatement`] type produced by a payroll
//! calculation and the [`AuditStep`] records that document how each
//! deduction, bracket lookup, and rounding step was applied.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WithholdingCategory;

/// A single step in the calculation audit trail.
///
/// Each step captures the input, output, and reasoning for one rule
/// application, so a payslip can show exactly how an amount was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statutory table the rule comes from.
    pub table_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The result of a payroll calculation for one staff member and period.
///
/// All monetary fields are whole yen. `worked_hours` is the two-decimal
/// display figure derived from `net_minutes`; it is never used for pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStatement {
    /// Unique identifier for this calculation.
    pub id: Uuid,
    /// The staff member the statement is for.
    pub staff_id: String,
    /// Net paid minutes across all sessions in the period.
    pub net_minutes: i64,
    /// Display hours, truncated at the hundredths place.
    pub worked_hours: Decimal,
    /// Gross salary in whole yen.
    pub gross_salary: i64,
    /// Gross salary minus social-insurance premiums, floored at zero.
    pub taxable_amount: i64,
    /// Withheld income tax in whole yen.
    pub income_tax: i64,
    /// Take-home pay after social insurance and income tax.
    pub net_pay: i64,
    /// The withholding category the tax was calculated under.
    pub category: WithholdingCategory,
    /// Audit trail of every calculation step, in order.
    pub audit_steps: Vec<AuditStep>,
    /// When the calculation was performed.
    pub calculated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_statement() -> PayStatement {
        PayStatement {
            id: Uuid::new_v4(),
            staff_id: "staff_001".to_string(),
            net_minutes: 9600,
            worked_hours: Decimal::from_str("160.00").unwrap(),
            gross_salary: 192000,
            taxable_amount: 178000,
            income_tax: 3560,
            net_pay: 174440,
            category: WithholdingCategory::Primary,
            audit_steps: vec![AuditStep {
                step_number: 1,
                rule_id: "gross_salary".to_string(),
                rule_name: "Gross Salary".to_string(),
                table_ref: "-".to_string(),
                input: serde_json::json!({"minutes": 9600}),
                output: serde_json::json!({"amount": 192000}),
                reasoning: "9600 minutes at 1200/h".to_string(),
            }],
            calculated_at: Utc::now(),
        }
    }

    #[test]
    fn test_pay_statement_serialization_round_trip() {
        let statement = sample_statement();
        let json = serde_json::to_string(&statement).unwrap();
        let deserialized: PayStatement = serde_json::from_str(&json).unwrap();
        assert_eq!(statement, deserialized);
    }

    #[test]
    fn test_audit_step_fields_survive_round_trip() {
        let statement = sample_statement();
        let json = serde_json::to_string(&statement).unwrap();
        let deserialized: PayStatement = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.audit_steps.len(), 1);
        let step = &deserialized.audit_steps[0];
        assert_eq!(step.rule_id, "gross_salary");
        assert_eq!(step.input["minutes"], 9600);
    }
}
