//! Configuration types for the withholding schedule.
//!
//! This module contains the strongly-typed table structures that are
//! deserialized from the YAML schedule files. Every table is an ordered
//! sequence of rows evaluated first-match, so bracket-boundary semantics
//! stay auditable and testable on their own.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Metadata about the withholding schedule.
///
/// Identifies which published schedule the tables were transcribed from.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMetadata {
    /// The schedule code (e.g., "JP-GENSEN-GEPPYO").
    pub code: String,
    /// The human-readable name of the schedule.
    pub name: String,
    /// The version or effective date of the schedule.
    pub version: String,
    /// URL to the official schedule documentation.
    pub source_url: String,
}

/// One tier of the employment-income deduction table.
///
/// Tiers are matched first-to-last against the monthly salary; a tier
/// matches while the salary is strictly below `upper_bound` (a missing
/// bound marks the open-ended top tier). A tier with a `rate` is linear
/// (`salary * rate + offset`, ceiling-rounded to whole yen); a tier
/// without one is the flat amount in `offset`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmploymentDeductionTier {
    /// Exclusive upper bound of the tier, absent for the top tier.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Linear rate applied to the salary, absent for flat tiers.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Flat amount, or the offset added to the linear term.
    pub offset: Decimal,
}

/// One tier of the basic deduction step function.
#[derive(Debug, Clone, Deserialize)]
pub struct BasicDeductionTier {
    /// Exclusive upper bound of the tier, absent for the top tier.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// The flat deduction amount for this tier.
    pub amount: Decimal,
}

/// The deduction tables loaded from `deductions.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeductionConfig {
    /// Employment-income deduction tiers, ordered ascending.
    pub employment: Vec<EmploymentDeductionTier>,
    /// Monthly deduction per declared dependent.
    pub dependents_per_head: Decimal,
    /// Basic deduction tiers, ordered ascending.
    pub basic: Vec<BasicDeductionTier>,
}

/// One bracket of the primary progressive tax table.
///
/// Brackets are matched first-to-last against taxable income; a bracket
/// matches while the income is less than or equal to `upper_bound`
/// (inclusive bound, absent for the top bracket). Within a bracket the
/// tax is `income * rate - subtraction`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket, absent for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// The marginal rate for this bracket.
    pub rate: Decimal,
    /// The subtraction constant for this bracket.
    pub subtraction: Decimal,
}

/// One band of the secondary-category schedule.
///
/// Bands are matched first-to-last against the taxable amount; a band
/// matches while the amount is strictly below `upper_bound` (absent for
/// the top band). The tax is `amount * rate - subtraction`; the low and
/// mid bands have a zero subtraction.
#[derive(Debug, Clone, Deserialize)]
pub struct SecondaryBand {
    /// Exclusive upper bound of the band, absent for the top band.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// The flat rate applied to the whole taxable amount.
    pub rate: Decimal,
    /// The subtraction constant, zero for the low and mid bands.
    #[serde(default)]
    pub subtraction: Decimal,
}

/// The bracket tables loaded from `brackets.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketConfig {
    /// Primary-category brackets over taxable income, ordered ascending.
    pub primary: Vec<TaxBracket>,
    /// Secondary-category bands over the taxable amount, ordered ascending.
    pub secondary: Vec<SecondaryBand>,
}

/// One row of the verification override table.
///
/// A row matches when the taxable amount falls in `[lower_bound,
/// upper_bound)`. Matching rows return their literal tax value and bypass
/// the general formula entirely; they exist because the formula is an
/// approximation of the published stepped table and these rows must match
/// the table exactly.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideBand {
    /// Inclusive lower bound of the band.
    pub lower_bound: Decimal,
    /// Exclusive upper bound of the band.
    pub upper_bound: Decimal,
    /// The literal tax amount for the band.
    pub tax: Decimal,
}

/// The override table loaded from `overrides.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideConfig {
    /// Override rows, applicable only to primary-category staff with
    /// zero declared dependents. Ordered ascending, non-overlapping.
    pub zero_dependents: Vec<OverrideBand>,
}

/// The complete withholding schedule loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    metadata: ScheduleMetadata,
    deductions: DeductionConfig,
    brackets: BracketConfig,
    overrides: OverrideConfig,
}

impl ScheduleConfig {
    /// Creates a new ScheduleConfig from its component parts.
    pub fn new(
        metadata: ScheduleMetadata,
        deductions: DeductionConfig,
        brackets: BracketConfig,
        overrides: OverrideConfig,
    ) -> Self {
        Self {
            metadata,
            deductions,
            brackets,
            overrides,
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the deduction tables.
    pub fn deductions(&self) -> &DeductionConfig {
        &self.deductions
    }

    /// Returns the bracket tables.
    pub fn brackets(&self) -> &BracketConfig {
        &self.brackets
    }

    /// Returns the verification override table.
    pub fn overrides(&self) -> &OverrideConfig {
        &self.overrides
    }
}
