//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/trips/{trip_id}', use [format_endpoint].

/// The root route which redirects to the trips page.
pub const ROOT: &str = "/";
/// The page for listing and selecting trips.
pub const TRIPS_VIEW: &str = "/trips";
/// The page for creating a new trip.
pub const NEW_TRIP_VIEW: &str = "/trips/new";
/// The page for a single trip with its expenses and balances.
pub const TRIP_VIEW: &str = "/trips/{trip_id}";
/// The page for editing an existing trip.
pub const EDIT_TRIP_VIEW: &str = "/trips/{trip_id}/edit";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a trip.
pub const POST_TRIP: &str = "/api/trips";
/// The route to update a trip.
pub const PUT_TRIP: &str = "/api/trips/{trip_id}";
/// The route to delete a trip.
pub const DELETE_TRIP: &str = "/api/trips/{trip_id}";
/// The route to add a contributor to a trip.
pub const POST_CONTRIBUTOR: &str = "/api/trips/{trip_id}/contributors";
/// The route to delete a contributor.
pub const DELETE_CONTRIBUTOR: &str = "/api/contributors/{contributor_id}";
/// The route to add an expense to a trip.
pub const POST_EXPENSE: &str = "/api/trips/{trip_id}/expenses";
/// The route to update an expense.
pub const PUT_EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to delete an expense.
pub const DELETE_EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to get the contributor balances of a trip as JSON.
pub const TRIP_BALANCES_API: &str = "/api/trips/{trip_id}/balances";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/trips/{trip_id}', '{trip_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::TRIPS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRIP_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRIP_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRIP_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_EXPENSE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::POST_TRIP);
        assert_endpoint_is_valid_uri(endpoints::PUT_TRIP);
        assert_endpoint_is_valid_uri(endpoints::DELETE_TRIP);
        assert_endpoint_is_valid_uri(endpoints::POST_CONTRIBUTOR);
        assert_endpoint_is_valid_uri(endpoints::DELETE_CONTRIBUTOR);
        assert_endpoint_is_valid_uri(endpoints::POST_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::PUT_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::DELETE_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::TRIP_BALANCES_API);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint(endpoints::POST_EXPENSE, 42);

        assert_eq!(formatted_path, "/api/trips/42/expenses");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
