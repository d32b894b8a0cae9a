//! Core trip domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId, identity::UserName};

/// A validated, non-empty trip name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct TripName(String);

impl TripName {
    /// Create a trip name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTripName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyTripName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a trip name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for TripName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TripName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TripName::new(s)
    }
}

impl Display for TripName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a trip.
pub type TripId = DatabaseId;

/// A named group of contributors and the expenses they paid for, e.g. 'Ski Weekend'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Trip {
    pub id: TripId,
    pub name: TripName,
    pub description: Option<String>,
    /// The user who created the trip.
    pub created_by: UserName,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The details needed to create a [Trip].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub name: TripName,
    pub description: Option<String>,
    pub created_by: UserName,
}

/// Form data for trip creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct TripFormData {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl TripFormData {
    /// The trimmed description, or `None` if it was left blank.
    pub fn description(&self) -> Option<String> {
        let description = self.description.trim();

        if description.is_empty() {
            None
        } else {
            Some(description.to_owned())
        }
    }
}

#[cfg(test)]
mod trip_name_tests {
    use crate::{Error, trip::TripName};

    #[test]
    fn new_fails_on_empty_string() {
        let trip_name = TripName::new("");

        assert_eq!(trip_name, Err(Error::EmptyTripName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let trip_name = TripName::new("\n\t \r");

        assert_eq!(trip_name, Err(Error::EmptyTripName));
    }

    #[test]
    fn new_trims_whitespace() {
        let trip_name = TripName::new("  Ski Weekend ").unwrap();

        assert_eq!(trip_name.as_ref(), "Ski Weekend");
    }
}
