//! Core contributor domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId, trip::TripId};

/// A validated, non-empty contributor name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ContributorName(String);

impl ContributorName {
    /// Create a contributor name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyContributorName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyContributorName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a contributor name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ContributorName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ContributorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a contributor.
pub type ContributorId = DatabaseId;

/// A person on a trip who may pay for expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Contributor {
    pub id: ContributorId,
    pub trip_id: TripId,
    pub name: ContributorName,
    pub email: Option<String>,
    /// The name of the user this contributor is linked to, if any.
    pub user_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The details needed to create a [Contributor].
#[derive(Debug, Clone, PartialEq)]
pub struct NewContributor {
    pub trip_id: TripId,
    pub name: ContributorName,
    pub email: Option<String>,
    pub user_id: Option<String>,
}

impl NewContributor {
    /// A contributor with just a name, as created while adding an expense.
    pub fn with_name(trip_id: TripId, name: ContributorName) -> Self {
        Self {
            trip_id,
            name,
            email: None,
            user_id: None,
        }
    }
}

/// Form data for adding a contributor to a trip.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContributorFormData {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl ContributorFormData {
    /// The trimmed email, or `None` if it was left blank.
    pub fn email(&self) -> Option<String> {
        let email = self.email.trim();

        (!email.is_empty()).then(|| email.to_owned())
    }
}
