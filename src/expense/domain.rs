//! Core expense domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error, contributor::ContributorId, database_id::DatabaseId, identity::UserName, trip::TripId,
};

/// Database identifier for an expense.
pub type ExpenseId = DatabaseId;

/// A single payment made by one contributor during a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub trip_id: TripId,
    /// The amount paid in dollars, always finite and zero or more.
    pub amount: f64,
    pub description: String,
    pub paid_by_contributor_id: ContributorId,
    /// The user who recorded the expense.
    pub created_by: UserName,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The details needed to create an [Expense].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub trip_id: TripId,
    pub amount: f64,
    pub description: String,
    pub paid_by_contributor_id: ContributorId,
    pub created_by: UserName,
}

/// The fields of an [Expense] that can be changed after it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseUpdate {
    pub amount: f64,
    pub description: String,
    pub paid_by_contributor_id: ContributorId,
}

/// Check that `amount` is a finite number that is zero or more.
///
/// # Errors
///
/// Returns [Error::InvalidAmount] for negative, NaN or infinite amounts.
pub fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount))
    }
}

/// Trim `description` and check that it is not empty.
///
/// # Errors
///
/// Returns [Error::EmptyDescription] if `description` is empty or just whitespace.
pub fn validate_description(description: &str) -> Result<String, Error> {
    let description = description.trim();

    if description.is_empty() {
        Err(Error::EmptyDescription)
    } else {
        Ok(description.to_owned())
    }
}

mod optional_id {
    //! Deserializes an optional ID from a form field where the empty string means `None`.
    //!
    //! HTML selects send their value as a string and the "add new contributor"
    //! option has no ID.
    use serde::{Deserialize, Deserializer, de::Error};

    use crate::database_id::DatabaseId;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DatabaseId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;

        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some).map_err(D::Error::custom),
        }
    }
}

/// Form data for expense creation and editing.
///
/// The payer is either an existing contributor selected with `paid_by`, or a
/// new contributor typed into `new_contributor_name`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseFormData {
    pub amount: f64,
    pub description: String,
    #[serde(default, deserialize_with = "optional_id::deserialize")]
    pub paid_by: Option<ContributorId>,
    #[serde(default)]
    pub new_contributor_name: String,
}

#[cfg(test)]
mod validation_tests {
    use crate::Error;

    use super::{validate_amount, validate_description};

    #[test]
    fn accepts_zero_and_positive_amounts() {
        assert_eq!(validate_amount(0.0), Ok(0.0));
        assert_eq!(validate_amount(12.5), Ok(12.5));
    }

    #[test]
    fn rejects_negative_amounts() {
        assert_eq!(validate_amount(-0.01), Err(Error::InvalidAmount(-0.01)));
    }

    #[test]
    fn rejects_non_finite_amounts() {
        assert!(validate_amount(f64::NAN).is_err());
        assert_eq!(
            validate_amount(f64::INFINITY),
            Err(Error::InvalidAmount(f64::INFINITY))
        );
    }

    #[test]
    fn description_is_trimmed() {
        assert_eq!(validate_description("  Fuel "), Ok("Fuel".to_owned()));
    }

    #[test]
    fn rejects_blank_description() {
        assert_eq!(validate_description(" \n"), Err(Error::EmptyDescription));
    }
}
