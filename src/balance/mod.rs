//! Contributor balances and trip summaries.

mod api;
mod calculator;
mod view;

pub use api::get_trip_balances_endpoint;
pub use calculator::{
    ContributorBalance, PersonSpending, TripSummary, calculate_balances, summarize_trip,
};
pub use view::{balances_view, spending_by_person_view, summary_cards_view};

#[cfg(test)]
pub(crate) use calculator::test_helpers;
