//! Sets up the application's SQLite database.

use rusqlite::Connection;

use crate::{
    Error, contributor::create_contributor_table, expense::create_expense_table,
    trip::create_trip_table,
};

/// Create the tables for the domain models if they do not exist yet.
///
/// Foreign keys are switched on for the connection so that deleting a trip
/// also deletes its contributors and expenses.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the SQL statements fail.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    create_trip_table(connection)?;
    create_contributor_table(connection)?;
    create_expense_table(connection)?;

    Ok(())
}
