//! Expense editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    contributor::{Contributor, get_contributors_for_trip},
    endpoints,
    expense::{
        Expense, ExpenseFormData, ExpenseId, ExpenseUpdate, create::resolve_payer, get_expense,
        update_expense, validate_amount, validate_description,
        view::{ExpenseFormValues, expense_form_fields},
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, link},
    navigation::NavBar,
};

/// The state needed for the edit expense page and the update expense endpoint.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the expense editing page.
///
/// Responds with the 404 page if the expense does not exist.
pub async fn get_edit_expense_page(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<EditExpenseState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = get_expense(expense_id, &connection)?;
    let contributors = get_contributors_for_trip(expense.trip_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve contributors: {error}"))?;

    Ok(edit_expense_view(&expense, &contributors).into_response())
}

/// Handle expense update form submission.
///
/// Redirects to the expense's trip page so the balances are recalculated.
pub async fn update_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<EditExpenseState>,
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

    let trip_id = match get_expense(expense_id, &connection) {
        Ok(expense) => expense.trip_id,
        Err(Error::NotFound) => return Error::UpdateMissingExpense.into_alert_response(),
        Err(error) => return error.into_alert_response(),
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

            update_expense(
                expense_id,
                ExpenseUpdate {
                    amount,
                    description,
                    paid_by_contributor_id,
                },
                &transaction,
            )?;

            transaction.commit()?;

            Ok(())
        });

    match result {
        Ok(()) => (
            HxRedirect(endpoints::format_endpoint(endpoints::TRIP_VIEW, trip_id)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::debug!("Could not update expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_expense_view(expense: &Expense, contributors: &[Contributor]) -> Markup {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_EXPENSE, expense.id);
    let trip_url = endpoints::format_endpoint(endpoints::TRIP_VIEW, expense.trip_id);
    let nav_bar = NavBar::new(&edit_endpoint).into_html();
    let values = ExpenseFormValues {
        amount: Some(expense.amount),
        description: &expense.description,
        paid_by: Some(expense.paid_by_contributor_id),
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Expense" }

                (expense_form_fields(contributors, &values))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Expense" }
            }

            p class="mt-4" { (link(&trip_url, "Back to trip")) }
        }
    };

    base("Edit Expense", &[dollar_input_styles()], &content)
}

#[cfg(test)]
mod edit_expense_tests {
    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use scraper::Selector;

    use crate::{
        Error, endpoints,
        expense::{ExpenseFormData, get_expense},
        test_utils::{
            assert_content_type, assert_form_input_with_value,
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_hx_redirect,
            assert_valid_html, get_test_connection, insert_contributor, insert_expense,
            insert_trip, must_get_form, parse_html_document,
        },
    };

    use super::{EditExpenseState, get_edit_expense_page, update_expense_endpoint};

    fn get_state() -> EditExpenseState {
        EditExpenseState {
            db_connection: get_test_connection(),
        }
    }

    #[tokio::test]
    async fn edit_page_shows_current_values() {
        let state = get_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            let trip = insert_trip("Trip", &connection);
            insert_contributor(trip.id, "Alice", &connection);
            let bob = insert_contributor(trip.id, "Bob", &connection);
            insert_expense(trip.id, 12.5, "Fuel", bob.id, &connection)
        };

        let response = get_edit_expense_page(Path(expense.id), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::PUT_EXPENSE, expense.id),
            "hx-put",
        );
        assert_form_input_with_value(&form, "amount", "number", "12.50");
        assert_form_input_with_value(&form, "description", "text", "Fuel");
        assert_form_submit_button_with_text(&form, "Update Expense");

        let selected = form
            .select(&Selector::parse("#paid_by option[selected]").unwrap())
            .next()
            .expect("No selected payer");
        assert_eq!(selected.text().collect::<String>(), "Bob");
    }

    #[tokio::test]
    async fn edit_page_for_missing_expense_is_not_found() {
        let result = get_edit_expense_page(Path(999999), State(get_state())).await;

        assert_eq!(result.err(), Some(Error::NotFound));
    }

    #[tokio::test]
    async fn update_changes_expense_and_redirects_to_trip() {
        let state = get_state();
        let (trip, bob, expense) = {
            let connection = state.db_connection.lock().unwrap();
            let trip = insert_trip("Trip", &connection);
            let alice = insert_contributor(trip.id, "Alice", &connection);
            let bob = insert_contributor(trip.id, "Bob", &connection);
            let expense = insert_expense(trip.id, 12.5, "Fuel", alice.id, &connection);
            (trip, bob, expense)
        };
        let form = ExpenseFormData {
            amount: 20.0,
            description: "Fuel and snacks".to_owned(),
            paid_by: Some(bob.id),
            new_contributor_name: String::new(),
        };

        let response = update_expense_endpoint(Path(expense.id), State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(
            &response,
            &endpoints::format_endpoint(endpoints::TRIP_VIEW, trip.id),
        );
        let updated = get_expense(expense.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.amount, 20.0);
        assert_eq!(updated.description, "Fuel and snacks");
        assert_eq!(updated.paid_by_contributor_id, bob.id);
    }

    #[tokio::test]
    async fn update_missing_expense_returns_not_found() {
        let form = ExpenseFormData {
            amount: 20.0,
            description: "Fuel".to_owned(),
            paid_by: Some(1),
            new_contributor_name: String::new(),
        };

        let response = update_expense_endpoint(Path(999999), State(get_state()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_with_invalid_amount_is_rejected() {
        let state = get_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            let trip = insert_trip("Trip", &connection);
            let alice = insert_contributor(trip.id, "Alice", &connection);
            insert_expense(trip.id, 12.5, "Fuel", alice.id, &connection)
        };
        let form = ExpenseFormData {
            amount: -1.0,
            description: "Fuel".to_owned(),
            paid_by: Some(expense.paid_by_contributor_id),
            new_contributor_name: String::new(),
        };

        let response = update_expense_endpoint(Path(expense.id), State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let unchanged = get_expense(expense.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(unchanged.amount, 12.5);
    }
}
