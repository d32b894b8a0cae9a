//! Trips: named groups of contributors and the expenses they share.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod page;

pub use create::{create_trip_endpoint, get_new_trip_page};
pub use db::{create_trip, create_trip_table, delete_trip, get_all_trips, get_trip, update_trip};
pub use delete::delete_trip_endpoint;
pub use domain::{NewTrip, Trip, TripId, TripName};
pub use edit::{get_edit_trip_page, update_trip_endpoint};
pub use list::get_trips_page;
pub use page::get_trip_page;
