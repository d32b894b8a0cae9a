//! Defines the app's routes and the router that serves them.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    balance::get_trip_balances_endpoint,
    contributor::{create_contributor_endpoint, delete_contributor_endpoint},
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_edit_expense_page,
        update_expense_endpoint,
    },
    identity::identify_user,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    trip::{
        create_trip_endpoint, delete_trip_endpoint, get_edit_trip_page, get_new_trip_page,
        get_trip_page, get_trips_page, update_trip_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRIPS_VIEW, get(get_trips_page))
        .route(endpoints::NEW_TRIP_VIEW, get(get_new_trip_page))
        .route(endpoints::TRIP_VIEW, get(get_trip_page))
        .route(endpoints::EDIT_TRIP_VIEW, get(get_edit_trip_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::POST_TRIP, post(create_trip_endpoint))
        .route(endpoints::PUT_TRIP, put(update_trip_endpoint))
        .route(endpoints::DELETE_TRIP, delete(delete_trip_endpoint))
        .route(
            endpoints::POST_CONTRIBUTOR,
            post(create_contributor_endpoint),
        )
        .route(
            endpoints::DELETE_CONTRIBUTOR,
            delete(delete_contributor_endpoint),
        )
        .route(endpoints::POST_EXPENSE, post(create_expense_endpoint))
        .route(endpoints::PUT_EXPENSE, put(update_expense_endpoint))
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint))
        .route(
            endpoints::TRIP_BALANCES_API,
            get(get_trip_balances_endpoint),
        );

    page_routes
        .merge(api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), identify_user))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the trips page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRIPS_VIEW)
}
