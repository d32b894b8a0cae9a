//! The page for a single trip: its expenses, contributors and balances.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error,
    balance::{
        balances_view, calculate_balances, spending_by_person_view, summarize_trip,
        summary_cards_view,
    },
    contributor::{Contributor, contributors_view, get_contributors_for_trip},
    endpoints,
    expense::{Expense, expense_list_view, get_expenses_for_trip, new_expense_form_view},
    html::{FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    timezone::get_local_offset,
    trip::{Trip, TripId, get_all_trips, get_trip},
};

/// The state needed for the trip page.
#[derive(Debug, Clone)]
pub struct TripPageState {
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TripPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for a trip.
///
/// The balances are calculated from the trip's contributors and expenses as
/// they are when the page is requested. Responds with the 404 page if the
/// trip does not exist.
pub async fn get_trip_page(
    Path(trip_id): Path<TripId>,
    State(state): State<TripPageState>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let trip = get_trip(trip_id, &connection)?;
    let all_trips = get_all_trips(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve trips: {error}"))?;
    let contributors = get_contributors_for_trip(trip_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve contributors: {error}"))?;
    let expenses = get_expenses_for_trip(trip_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?;

    Ok(trip_view(&trip, &all_trips, &contributors, &expenses, local_offset).into_response())
}

/// A drop down for switching to another trip.
fn trip_selector_view(current_trip: &Trip, all_trips: &[Trip]) -> Markup {
    html! {
        select
            id="trip-selector"
            aria-label="Select trip"
            data-trip-selector
            class={ (FORM_TEXT_INPUT_STYLE) " sm:w-64" }
        {
            @for trip in all_trips {
                option
                    value=(endpoints::format_endpoint(endpoints::TRIP_VIEW, trip.id))
                    selected[trip.id == current_trip.id]
                {
                    (trip.name)
                }
            }
        }
    }
}

fn trip_view(
    trip: &Trip,
    all_trips: &[Trip],
    contributors: &[Contributor],
    expenses: &[Expense],
    local_offset: UtcOffset,
) -> Markup {
    let trip_url = endpoints::format_endpoint(endpoints::TRIP_VIEW, trip.id);
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_TRIP_VIEW, trip.id);
    let nav_bar = NavBar::new(&trip_url).into_html();

    let summary = summarize_trip(contributors, expenses);
    let balances = calculate_balances(contributors, expenses);

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full lg:max-w-5xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    div
                    {
                        h1 class="text-2xl font-bold" { (trip.name) }

                        @if let Some(description) = &trip.description {
                            p class="text-gray-600 dark:text-gray-300" { (description) }
                        }

                        a href=(edit_url) class={ (LINK_STYLE) " text-sm" } { "Edit trip" }
                    }

                    (trip_selector_view(trip, all_trips))
                }

                (summary_cards_view(&summary))

                div class="grid grid-cols-1 gap-6 lg:grid-cols-2"
                {
                    div class="space-y-6"
                    {
                        (new_expense_form_view(trip.id, contributors))
                        (contributors_view(trip.id, contributors))
                    }

                    div class="space-y-6"
                    {
                        (balances_view(&balances, summary.average_per_person))
                        (spending_by_person_view(&summary))
                    }
                }

                (expense_list_view(expenses, contributors, local_offset))
            }
        }
    };

    base(trip.name.as_ref(), &[dollar_input_styles()], &content)
}
