#![allow(missing_docs)]

mod form;
mod response;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    contributor::{Contributor, ContributorId, ContributorName, NewContributor, create_contributor},
    db::initialize,
    expense::{Expense, NewExpense, create_expense},
    identity::UserName,
    trip::{NewTrip, Trip, TripId, TripName, create_trip},
};

pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_input_with_value,
    assert_form_submit_button, assert_form_submit_button_with_text, assert_hx_endpoint,
    must_get_form,
};
pub(crate) use response::{
    assert_content_type, assert_hx_redirect, assert_status_ok, assert_valid_html, get_header,
    parse_html_document, parse_html_fragment,
};

/// An in-memory database with all of the tables created.
pub(crate) fn get_test_connection() -> Arc<Mutex<Connection>> {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    Arc::new(Mutex::new(connection))
}

pub(crate) fn insert_trip(name: &str, connection: &Connection) -> Trip {
    create_trip(
        NewTrip {
            name: TripName::new_unchecked(name),
            description: None,
            created_by: UserName::new("alice"),
        },
        connection,
    )
    .expect("Could not create test trip")
}

pub(crate) fn insert_contributor(trip_id: TripId, name: &str, connection: &Connection) -> Contributor {
    create_contributor(
        NewContributor::with_name(trip_id, ContributorName::new_unchecked(name)),
        connection,
    )
    .expect("Could not create test contributor")
}

pub(crate) fn insert_expense(
    trip_id: TripId,
    amount: f64,
    description: &str,
    paid_by_contributor_id: ContributorId,
    connection: &Connection,
) -> Expense {
    create_expense(
        NewExpense {
            trip_id,
            amount,
            description: description.to_owned(),
            paid_by_contributor_id,
            created_by: UserName::new("alice"),
        },
        connection,
    )
    .expect("Could not create test expense")
}
