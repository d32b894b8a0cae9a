//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    alert::Alert, contributor::ContributorId, internal_server_error::InternalServerError,
    not_found::NotFoundError, trip::TripId,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a trip name.
    #[error("Trip name cannot be empty")]
    EmptyTripName,

    /// An empty string was used to create a contributor name.
    #[error("Contributor name cannot be empty")]
    EmptyContributorName,

    /// An empty string was used as the description of an expense.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// The amount of an expense was negative, NaN or infinite.
    ///
    /// Expenses record money that was spent, so amounts must be finite and
    /// no less than zero.
    #[error("{0} is not a valid amount, amounts must be zero or more")]
    InvalidAmount(f64),

    /// The trip ID does not refer to a trip in the database.
    #[error("the trip ID {0} does not refer to a valid trip")]
    InvalidTrip(TripId),

    /// The contributor ID does not refer to a contributor of the expense's trip.
    #[error("the contributor ID {0} does not refer to a contributor of this trip")]
    InvalidContributor(ContributorId),

    /// An expense was submitted without an existing contributor or a name
    /// for a new contributor.
    #[error("an expense needs someone who paid for it")]
    MissingContributor,

    /// The trip already has a contributor with this name.
    #[error("the contributor \"{0}\" already exists in this trip")]
    DuplicateContributorName(String),

    /// Tried to delete a contributor that has paid for at least one expense.
    ///
    /// Deleting the contributor would leave expenses without a payer, so the
    /// expenses must be deleted or reassigned first.
    #[error("the contributor \"{0}\" has paid for expenses and cannot be deleted")]
    ContributorHasExpenses(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a trip that does not exist
    #[error("tried to update a trip that is not in the database")]
    UpdateMissingTrip,

    /// Tried to delete a trip that does not exist
    #[error("tried to delete a trip that is not in the database")]
    DeleteMissingTrip,

    /// Tried to delete a contributor that does not exist
    #[error("tried to delete a contributor that is not in the database")]
    DeleteMissingContributor,

    /// Tried to update an expense that does not exist
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!(
                        "{amount} is not a valid amount. Enter an amount of zero or more."
                    ),
                },
            ),
            Error::EmptyDescription => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing description".to_owned(),
                    details: "Describe what the expense was for.".to_owned(),
                },
            ),
            Error::EmptyContributorName => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing contributor name".to_owned(),
                    details: "Enter the name of the person who paid.".to_owned(),
                },
            ),
            Error::MissingContributor => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Who paid?".to_owned(),
                    details: "Select who paid or enter the name of a new contributor.".to_owned(),
                },
            ),
            Error::InvalidTrip(trip_id) => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Invalid trip".to_owned(),
                    details: format!("Could not find a trip with the ID {trip_id}"),
                },
            ),
            Error::InvalidContributor(contributor_id) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid contributor".to_owned(),
                    details: format!(
                        "Could not find a contributor with the ID {contributor_id} in this trip"
                    ),
                },
            ),
            Error::DuplicateContributorName(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Duplicate contributor name".to_owned(),
                    details: format!(
                        "{name} is already a contributor of this trip. \
                        Choose a different name or select the existing contributor."
                    ),
                },
            ),
            Error::ContributorHasExpenses(name) => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Could not delete contributor".to_owned(),
                    details: format!(
                        "{name} has paid for expenses in this trip. \
                        Delete or edit those expenses first."
                    ),
                },
            ),
            Error::UpdateMissingTrip => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update trip".to_owned(),
                    details: "The trip could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingTrip => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete trip".to_owned(),
                    details: "The trip could not be found. \
                    Try refreshing the page to see if the trip has already been deleted."
                        .to_owned(),
                },
            ),
            Error::DeleteMissingContributor => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete contributor".to_owned(),
                    details: "The contributor could not be found. \
                    Try refreshing the page to see if the contributor has already been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingExpense => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update expense".to_owned(),
                    details: "The expense could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingExpense => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete expense".to_owned(),
                    details: "The expense could not be found. \
                    Try refreshing the page to see if the expense has already been deleted."
                        .to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }

    /// Convert the error into an HTTP response with a JSON body of the form `{"error": "..."}`.
    pub fn into_json_response(self) -> Response {
        let status_code = match self {
            Error::NotFound | Error::InvalidTrip(_) => StatusCode::NOT_FOUND,
            ref error => {
                tracing::error!("An unexpected error occurred: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            "An unexpected error occurred".to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
