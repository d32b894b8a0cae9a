//! Trip deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    trip::{TripId, delete_trip},
};

/// The state needed for deleting a trip.
#[derive(Debug, Clone)]
pub struct DeleteTripEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTripEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle trip deletion. Deletes the trip's contributors and expenses too.
///
/// Returns a success alert or an error alert.
pub async fn delete_trip_endpoint(
    Path(trip_id): Path<TripId>,
    State(state): State<DeleteTripEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_trip(trip_id, &connection) {
        Ok(_) => {
            tracing::info!("Deleted trip {trip_id}");

            Alert::SuccessSimple {
                message: "Trip deleted successfully".to_owned(),
            }
            .into_response()
        }
        Err(Error::DeleteMissingTrip) => Error::DeleteMissingTrip.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting trip {trip_id}: {error}");
            error.into_alert_response()
        }
    }
}
