//! Trip editing page and endpoint.

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
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        base, link,
    },
    navigation::NavBar,
    trip::{TripId, TripName, domain::TripFormData, get_trip, update_trip},
};

/// The state needed for the edit trip page and the update trip endpoint.
#[derive(Debug, Clone)]
pub struct EditTripState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTripState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the trip editing page.
pub async fn get_edit_trip_page(
    Path(trip_id): Path<TripId>,
    State(state): State<EditTripState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_TRIP_VIEW, trip_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_TRIP, trip_id);

    let (form_data, error_message) = match get_trip(trip_id, &connection) {
        Ok(trip) => (
            TripFormData {
                name: trip.name.to_string(),
                description: trip.description.unwrap_or_default(),
            },
            "",
        ),
        Err(error) => {
            let error_message = match error {
                Error::NotFound => "Trip not found",
                _ => {
                    tracing::error!("Failed to retrieve trip {trip_id}: {error}");
                    "Failed to load trip"
                }
            };

            (
                TripFormData {
                    name: String::new(),
                    description: String::new(),
                },
                error_message,
            )
        }
    };

    Ok(edit_trip_view(
        trip_id,
        &edit_endpoint,
        &update_endpoint,
        &form_data,
        error_message,
    )
    .into_response())
}

/// Handle trip update form submission.
pub async fn update_trip_endpoint(
    Path(trip_id): Path<TripId>,
    State(state): State<EditTripState>,
    Form(form_data): Form<TripFormData>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_TRIP, trip_id);

    let name = match TripName::new(&form_data.name) {
        Ok(name) => name,
        Err(error) => {
            return edit_trip_form_view(&update_endpoint, &form_data, &format!("Error: {error}"))
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_trip(trip_id, name, form_data.description(), &connection) {
        Ok(_) => (
            HxRedirect(endpoints::format_endpoint(endpoints::TRIP_VIEW, trip_id)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingTrip) => Error::UpdateMissingTrip.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while updating trip {trip_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_trip_view(
    trip_id: TripId,
    edit_endpoint: &str,
    update_endpoint: &str,
    form_data: &TripFormData,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = edit_trip_form_view(update_endpoint, form_data, error_message);
    let trip_url = endpoints::format_endpoint(endpoints::TRIP_VIEW, trip_id);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            (form)

            p class="mt-4" { (link(&trip_url, "Back to trip")) }
        }
    };

    base("Edit Trip", &[], &content)
}

fn edit_trip_form_view(
    update_trip_endpoint: &str,
    form_data: &TripFormData,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_trip_endpoint)
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
                    placeholder="Trip Name"
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

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Trip" }
        }
    }
}
