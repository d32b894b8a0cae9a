//! Endpoint for adding a contributor to a trip.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    contributor::{ContributorFormData, ContributorName, NewContributor, create_contributor},
    endpoints,
    trip::TripId,
};

/// The state needed for adding a contributor.
#[derive(Debug, Clone)]
pub struct CreateContributorEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateContributorEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the add contributor form submission.
pub async fn create_contributor_endpoint(
    Path(trip_id): Path<TripId>,
    State(state): State<CreateContributorEndpointState>,
    Form(form_data): Form<ContributorFormData>,
) -> Response {
    let name = match ContributorName::new(&form_data.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let new_contributor = NewContributor {
        trip_id,
        name,
        email: form_data.email(),
        user_id: None,
    };

    match create_contributor(new_contributor, &connection) {
        Ok(contributor) => {
            tracing::info!("Added contributor {} to trip {trip_id}", contributor.name);

            (
                HxRedirect(endpoints::format_endpoint(endpoints::TRIP_VIEW, trip_id)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::debug!("Could not add contributor to trip {trip_id}: {error}");
            error.into_alert_response()
        }
    }
}
