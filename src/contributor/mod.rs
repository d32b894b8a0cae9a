//! Contributors: the people on a trip who pay for expenses.

mod create;
mod db;
mod delete;
mod domain;
mod view;

pub use create::create_contributor_endpoint;
pub use db::{
    create_contributor, create_contributor_table, delete_contributor,
    find_or_create_contributor, get_contributor, get_contributors_for_trip,
};
pub use delete::delete_contributor_endpoint;
pub use domain::{Contributor, ContributorFormData, ContributorId, ContributorName, NewContributor};
pub use view::contributors_view;
