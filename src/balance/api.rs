//! JSON endpoint for the balances of a trip.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    balance::{ContributorBalance, calculate_balances, summarize_trip},
    contributor::get_contributors_for_trip,
    expense::get_expenses_for_trip,
    trip::{TripId, get_trip},
};

/// The state needed for the balances API.
#[derive(Debug, Clone)]
pub struct TripBalancesApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TripBalancesApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The balances of a trip's contributors in the order the contributors were added.
#[derive(Debug, Serialize)]
pub struct TripBalancesResponse {
    pub trip_id: TripId,
    pub total_expenses: f64,
    pub average_per_person: f64,
    pub balances: Vec<ContributorBalance>,
}

/// Get the contributor balances of a trip as JSON.
///
/// Responds with 404 and `{"error": "..."}` if the trip does not exist.
pub async fn get_trip_balances_endpoint(
    Path(trip_id): Path<TripId>,
    State(state): State<TripBalancesApiState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match get_trip_balances(trip_id, &connection) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => error.into_json_response(),
    }
}

fn get_trip_balances(
    trip_id: TripId,
    connection: &Connection,
) -> Result<TripBalancesResponse, Error> {
    let trip = get_trip(trip_id, connection)?;
    let contributors = get_contributors_for_trip(trip.id, connection)?;
    let expenses = get_expenses_for_trip(trip.id, connection)?;

    let summary = summarize_trip(&contributors, &expenses);
    let balances = calculate_balances(&contributors, &expenses);

    Ok(TripBalancesResponse {
        trip_id: trip.id,
        total_expenses: summary.total_expenses,
        average_per_person: summary.average_per_person,
        balances,
    })
}
