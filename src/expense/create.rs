//! Endpoint for adding an expense to a trip.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    contributor::{ContributorId, ContributorName, find_or_create_contributor},
    endpoints,
    expense::{
        ExpenseFormData, NewExpense, create_expense, validate_amount, validate_description,
    },
    identity::UserName,
    trip::TripId,
};

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Work out who paid for an expense.
///
/// A selected contributor is used as is. Otherwise the contributor named in
/// `new_contributor_name` is looked up, and added to the trip if needed.
///
/// # Errors
///
/// Returns [Error::MissingContributor] if neither a contributor nor a name was given.
pub(super) fn resolve_payer(
    trip_id: TripId,
    paid_by: Option<ContributorId>,
    new_contributor_name: &str,
    connection: &Connection,
) -> Result<ContributorId, Error> {
    if let Some(contributor_id) = paid_by {
        return Ok(contributor_id);
    }

    if new_contributor_name.trim().is_empty() {
        return Err(Error::MissingContributor);
    }

    let name = ContributorName::new(new_contributor_name)?;
    find_or_create_contributor(trip_id, name, connection).map(|contributor| contributor.id)
}

/// Handle the add expense form submission.
///
/// The expense and any new contributor are saved together, or not at all.
/// Redirects to the trip page so the balances are recalculated.
pub async fn create_expense_endpoint(
    Path(trip_id): Path<TripId>,
    State(state): State<CreateExpenseEndpointState>,
    Extension(user): Extension<UserName>,
    Form(form_data): Form<ExpenseFormData>,
) -> Response {
    let amount = match validate_amount(form_data.amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_alert_response(),
    };

    let description = match validate_description(&form_data.description) {
        Ok(description) => description,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let result = connection
        .unchecked_transaction()
        .map_err(Error::from)
        .and_then(|transaction| {
            let paid_by_contributor_id = resolve_payer(
                trip_id,
                form_data.paid_by,
                &form_data.new_contributor_name,
                &transaction,
            )?;

            let expense = create_expense(
                NewExpense {
                    trip_id,
                    amount,
                    description,
                    paid_by_contributor_id,
                    created_by: user,
                },
                &transaction,
            )?;

            transaction.commit()?;

            Ok(expense)
        });

    match result {
        Ok(expense) => {
            tracing::info!(
                "{} added expense {} of {} to trip {trip_id}",
                expense.created_by,
                expense.id,
                expense.amount
            );

            (
                HxRedirect(endpoints::format_endpoint(endpoints::TRIP_VIEW, trip_id)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::debug!("Could not create expense for trip {trip_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod create_expense_endpoint_tests {
    use axum::{
        Extension, Form,
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    };

    use crate::{
        contributor::get_contributors_for_trip,
        endpoints,
        expense::{ExpenseFormData, get_expenses_for_trip},
        identity::UserName,
        test_utils::{assert_hx_redirect, get_test_connection, insert_contributor, insert_trip},
    };

    use super::{CreateExpenseEndpointState, create_expense_endpoint};

    fn get_state() -> CreateExpenseEndpointState {
        CreateExpenseEndpointState {
            db_connection: get_test_connection(),
        }
    }

    async fn submit(
        state: &CreateExpenseEndpointState,
        trip_id: i64,
        form: ExpenseFormData,
    ) -> Response {
        create_expense_endpoint(
            Path(trip_id),
            State(state.clone()),
            Extension(UserName::new("bob")),
            Form(form),
        )
        .await
        .into_response()
    }

    #[tokio::test]
    async fn creates_expense_for_existing_contributor() {
        let state = get_state();
        let (trip, alice) = {
            let connection = state.db_connection.lock().unwrap();
            let trip = insert_trip("Trip", &connection);
            let alice = insert_contributor(trip.id, "Alice", &connection);
            (trip, alice)
        };
        let form = ExpenseFormData {
            amount: 42.5,
            description: "Fuel".to_owned(),
            paid_by: Some(alice.id),
            new_contributor_name: String::new(),
        };

        let response = submit(&state, trip.id, form).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(
            &response,
            &endpoints::format_endpoint(endpoints::TRIP_VIEW, trip.id),
        );
        let expenses = get_expenses_for_trip(trip.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].amount, 42.5);
        assert_eq!(expenses[0].paid_by_contributor_id, alice.id);
        assert_eq!(expenses[0].created_by, UserName::new("bob"));
    }

    #[tokio::test]
    async fn creates_new_contributor_by_name() {
        let state = get_state();
        let trip = insert_trip("Trip", &state.db_connection.lock().unwrap());
        let form = ExpenseFormData {
            amount: 10.0,
            description: "Snacks".to_owned(),
            paid_by: None,
            new_contributor_name: " Dan ".to_owned(),
        };

        let response = submit(&state, trip.id, form).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let connection = state.db_connection.lock().unwrap();
        let contributors = get_contributors_for_trip(trip.id, &connection).unwrap();
        assert_eq!(contributors.len(), 1);
        assert_eq!(contributors[0].name.as_ref(), "Dan");
        let expenses = get_expenses_for_trip(trip.id, &connection).unwrap();
        assert_eq!(expenses[0].paid_by_contributor_id, contributors[0].id);
    }

    #[tokio::test]
    async fn reuses_existing_contributor_with_same_name() {
        let state = get_state();
        let (trip, alice) = {
            let connection = state.db_connection.lock().unwrap();
            let trip = insert_trip("Trip", &connection);
            let alice = insert_contributor(trip.id, "Alice", &connection);
            (trip, alice)
        };
        let form = ExpenseFormData {
            amount: 10.0,
            description: "Snacks".to_owned(),
            paid_by: None,
            new_contributor_name: "Alice".to_owned(),
        };

        let response = submit(&state, trip.id, form).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_contributors_for_trip(trip.id, &connection).unwrap().len(), 1);
        let expenses = get_expenses_for_trip(trip.id, &connection).unwrap();
        assert_eq!(expenses[0].paid_by_contributor_id, alice.id);
    }

    #[tokio::test]
    async fn missing_payer_is_rejected() {
        let state = get_state();
        let trip = insert_trip("Trip", &state.db_connection.lock().unwrap());
        let form = ExpenseFormData {
            amount: 10.0,
            description: "Snacks".to_owned(),
            paid_by: None,
            new_contributor_name: "  ".to_owned(),
        };

        let response = submit(&state, trip.id, form).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_without_creating_contributor() {
        let state = get_state();
        let trip = insert_trip("Trip", &state.db_connection.lock().unwrap());
        let form = ExpenseFormData {
            amount: -10.0,
            description: "Refund".to_owned(),
            paid_by: None,
            new_contributor_name: "Dan".to_owned(),
        };

        let response = submit(&state, trip.id, form).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        assert!(get_contributors_for_trip(trip.id, &connection).unwrap().is_empty());
        assert!(get_expenses_for_trip(trip.id, &connection).unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_description_is_rejected() {
        let state = get_state();
        let (trip, alice) = {
            let connection = state.db_connection.lock().unwrap();
            let trip = insert_trip("Trip", &connection);
            let alice = insert_contributor(trip.id, "Alice", &connection);
            (trip, alice)
        };
        let form = ExpenseFormData {
            amount: 10.0,
            description: " ".to_owned(),
            paid_by: Some(alice.id),
            new_contributor_name: String::new(),
        };

        let response = submit(&state, trip.id, form).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn contributor_from_other_trip_is_rejected() {
        let state = get_state();
        let (trip, outsider) = {
            let connection = state.db_connection.lock().unwrap();
            let trip = insert_trip("Trip", &connection);
            let other_trip = insert_trip("Other", &connection);
            let outsider = insert_contributor(other_trip.id, "Outsider", &connection);
            (trip, outsider)
        };
        let form = ExpenseFormData {
            amount: 10.0,
            description: "Snacks".to_owned(),
            paid_by: Some(outsider.id),
            new_contributor_name: String::new(),
        };

        let response = submit(&state, trip.id, form).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_trip_is_rejected_without_creating_contributor() {
        let state = get_state();
        let form = ExpenseFormData {
            amount: 10.0,
            description: "Snacks".to_owned(),
            paid_by: None,
            new_contributor_name: "Dan".to_owned(),
        };

        let response = submit(&state, 42, form).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
