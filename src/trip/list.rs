//! The trips page, which lists every trip so the user can pick one.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error, endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links, format_date_time,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    trip::{Trip, get_all_trips},
};

/// The state needed for the trips page.
#[derive(Debug, Clone)]
pub struct TripsPageState {
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TripsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the trips page, newest trip first.
pub async fn get_trips_page(State(state): State<TripsPageState>) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let trips = get_all_trips(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve trips: {error}"))?;

    Ok(trips_view(&trips, local_offset).into_response())
}

fn trips_view(trips: &[Trip], local_offset: UtcOffset) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRIPS_VIEW).into_html();
    let new_trip_route = endpoints::NEW_TRIP_VIEW;

    let table_row = |trip: &Trip| {
        let trip_url = endpoints::format_endpoint(endpoints::TRIP_VIEW, trip.id);
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_TRIP_VIEW, trip.id);
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRIP, trip.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? \
            This will also delete all of its contributors and expenses.",
            trip.name
        );

        html!(
            tr class=(TABLE_ROW_STYLE) data-trip-id=(trip.id)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    a href=(trip_url) class=(LINK_STYLE) { (trip.name) }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (trip.description.as_deref().unwrap_or(""))
                }

                td class=(TABLE_CELL_STYLE) { (trip.created_by) }

                td class=(TABLE_CELL_STYLE)
                {
                    (format_date_time(trip.created_at, local_offset))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &edit_url,
                            &delete_url,
                            &confirm_message,
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Trips" }

                    a href=(new_trip_route) class=(LINK_STYLE)
                    {
                        "Create Trip"
                    }
                }

                div class="overflow-x-auto dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Owner" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Created" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for trip in trips {
                                (table_row(trip))
                            }

                            @if trips.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No trips yet. "
                                        a href=(new_trip_route) class=(LINK_STYLE)
                                        {
                                            "Create your first trip"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Trips", &[], &content)
}
