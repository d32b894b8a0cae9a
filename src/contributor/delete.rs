//! Contributor deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    contributor::{ContributorId, delete_contributor, get_contributor},
    endpoints,
};

/// The state needed for deleting a contributor.
#[derive(Debug, Clone)]
pub struct DeleteContributorEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteContributorEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle contributor deletion.
///
/// Contributors who paid for an expense cannot be deleted and get a 409 alert instead.
pub async fn delete_contributor_endpoint(
    Path(contributor_id): Path<ContributorId>,
    State(state): State<DeleteContributorEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let trip_id = match get_contributor(contributor_id, &connection) {
        Ok(contributor) => contributor.trip_id,
        Err(Error::NotFound) => return Error::DeleteMissingContributor.into_alert_response(),
        Err(error) => return error.into_alert_response(),
    };

    match delete_contributor(contributor_id, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::format_endpoint(endpoints::TRIP_VIEW, trip_id)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ (Error::ContributorHasExpenses(_) | Error::DeleteMissingContributor)) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting contributor {contributor_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_contributor_endpoint_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        Error,
        contributor::get_contributor,
        endpoints,
        test_utils::{
            assert_hx_redirect, get_test_connection, insert_contributor, insert_expense,
            insert_trip, parse_html_fragment,
        },
    };

    use super::{DeleteContributorEndpointState, delete_contributor_endpoint};

    fn get_state() -> DeleteContributorEndpointState {
        DeleteContributorEndpointState {
            db_connection: get_test_connection(),
        }
    }

    #[tokio::test]
    async fn deletes_contributor_without_expenses() {
        let state = get_state();
        let (trip, alice) = {
            let connection = state.db_connection.lock().unwrap();
            let trip = insert_trip("Trip", &connection);
            let alice = insert_contributor(trip.id, "Alice", &connection);
            (trip, alice)
        };

        let response = delete_contributor_endpoint(Path(alice.id), State(state.clone())).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(
            &response,
            &endpoints::format_endpoint(endpoints::TRIP_VIEW, trip.id),
        );
        assert_eq!(
            get_contributor(alice.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn contributor_with_expenses_is_kept() {
        let state = get_state();
        let alice = {
            let connection = state.db_connection.lock().unwrap();
            let trip = insert_trip("Trip", &connection);
            let alice = insert_contributor(trip.id, "Alice", &connection);
            insert_expense(trip.id, 5.0, "Coffee", alice.id, &connection);
            alice
        };

        let response = delete_contributor_endpoint(Path(alice.id), State(state.clone())).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Alice has paid for expenses"));
        assert!(get_contributor(alice.id, &state.db_connection.lock().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn missing_contributor_returns_not_found() {
        let response = delete_contributor_endpoint(Path(999999), State(get_state())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
