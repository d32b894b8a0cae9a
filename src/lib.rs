//! Tripsplit is a web app for sharing the cost of a trip.
//!
//! Spending is grouped into trips. Each expense is paid by one contributor and
//! the app works out who is owed money and who owes money by splitting the
//! total spend evenly between everyone on the trip.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod balance;
mod contributor;
mod database_id;
mod db;
mod endpoints;
mod error;
mod expense;
mod html;
mod identity;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod trip;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use balance::{
    ContributorBalance, PersonSpending, TripSummary, calculate_balances, summarize_trip,
};
pub use contributor::{
    Contributor, ContributorId, ContributorName, NewContributor, create_contributor,
};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use expense::{Expense, ExpenseId, NewExpense, create_expense};
pub use identity::{DEFAULT_USER_HEADER, IdentityConfig, UserName};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::get_local_offset;
pub use trip::{NewTrip, Trip, TripId, TripName, create_trip};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
