//! Staff model and related types.
//!
//! This module defines the StaffMember struct and the WithholdingCategory
//! enum that selects which statutory withholding schedule applies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The withholding category declared for a staff member.
///
/// The two categories correspond to the two columns of the statutory
/// monthly withholding table: staff who filed a dependents declaration
/// with this employer fall under [`WithholdingCategory::Primary`];
/// staff who did not fall under [`WithholdingCategory::Secondary`]
/// and are taxed on a flat higher-rate schedule without any dependents
/// deduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithholdingCategory {
    /// Dependents declaration filed; dependents deduction applies.
    #[default]
    Primary,
    /// No declaration filed; flat higher-rate schedule, no dependents deduction.
    Secondary,
}

impl WithholdingCategory {
    /// Resolves a category from the raw marker stored with staff metadata.
    ///
    /// Only an exact `"secondary"` marker selects the secondary schedule.
    /// An absent or unrecognized marker falls back to the primary category,
    /// so callers that fail to supply a category are not penalized with the
    /// harsher schedule.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::WithholdingCategory;
    ///
    /// assert_eq!(
    ///     WithholdingCategory::from_marker(Some("secondary")),
    ///     WithholdingCategory::Secondary
    /// );
    /// assert_eq!(
    ///     WithholdingCategory::from_marker(Some("SECONDARY")),
    ///     WithholdingCategory::Primary
    /// );
    /// assert_eq!(
    ///     WithholdingCategory::from_marker(None),
    ///     WithholdingCategory::Primary
    /// );
    /// ```
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some("secondary") => WithholdingCategory::Secondary,
            _ => WithholdingCategory::Primary,
        }
    }

    /// Returns true if this is the secondary category.
    pub fn is_secondary(&self) -> bool {
        *self == WithholdingCategory::Secondary
    }
}

impl std::fmt::Display for WithholdingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WithholdingCategory::Primary => write!(f, "primary"),
            WithholdingCategory::Secondary => write!(f, "secondary"),
        }
    }
}

/// Represents a staff member subject to payroll calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Unique identifier for the staff member.
    pub id: String,
    /// The hourly wage in whole yen.
    pub hourly_wage: Decimal,
    /// The declared withholding category (primary when unspecified).
    #[serde(default)]
    pub withholding_category: WithholdingCategory,
    /// Number of qualifying dependents (including a qualifying spouse)
    /// declared for the pay period.
    #[serde(default)]
    pub dependent_count: u32,
    /// Social-insurance premiums withheld for the month, in whole yen.
    /// Subtracted from gross salary before the tax lookup.
    #[serde(default)]
    pub social_insurance_deduction: i64,
}

impl StaffMember {
    /// Returns true if the staff member falls under the secondary category.
    pub fn is_secondary(&self) -> bool {
        self.withholding_category.is_secondary()
    }
}
