//! Trip creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    identity::UserName,
    navigation::NavBar,
    trip::{NewTrip, TripName, create_trip, domain::TripFormData},
};

/// The state needed for creating a trip.
#[derive(Debug, Clone)]
pub struct CreateTripEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTripEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the trip creation page.
pub async fn get_new_trip_page() -> Response {
    new_trip_view().into_response()
}

/// Handle trip creation form submission.
///
/// Redirects to the new trip's page so it becomes the selected trip.
pub async fn create_trip_endpoint(
    State(state): State<CreateTripEndpointState>,
    Extension(user): Extension<UserName>,
    Form(form_data): Form<TripFormData>,
) -> Response {
    let name = match TripName::new(&form_data.name) {
        Ok(name) => name,
        Err(error) => {
            return new_trip_form_view(&form_data, &format!("Error: {error}")).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let new_trip = NewTrip {
        name,
        description: form_data.description(),
        created_by: user,
    };

    match create_trip(new_trip, &connection) {
        Ok(trip) => {
            tracing::info!("{} created trip {} ({})", trip.created_by, trip.id, trip.name);

            (
                HxRedirect(endpoints::format_endpoint(endpoints::TRIP_VIEW, trip.id)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a trip: {error}");

            error.into_alert_response()
        }
    }
}

fn new_trip_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRIP_VIEW).into_html();
    let form = new_trip_form_view(
        &TripFormData {
            name: String::new(),
            description: String::new(),
        },
        "",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Trip", &[], &content)
}

fn new_trip_form_view(form_data: &TripFormData, error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_TRIP)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Trip Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g. Ski Weekend"
                    value=(form_data.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="description"
                    class=(FORM_LABEL_STYLE)
                {
                    "Description (optional)"
                }

                textarea
                    id="description"
                    name="description"
                    rows="3"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (form_data.description)
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Trip" }
        }
    }
}
