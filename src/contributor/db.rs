//! Database operations for contributors.

use rusqlite::{Connection, OptionalExtension, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    contributor::{Contributor, ContributorId, ContributorName, NewContributor},
    trip::TripId,
};

const SELECT_CONTRIBUTOR: &str =
    "SELECT id, trip_id, name, email, user_id, created_at FROM contributor";

/// Add a contributor to a trip and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::InvalidTrip] if the trip does not exist and
/// [Error::DuplicateContributorName] if the trip already has a contributor
/// with the same name, ignoring case.
pub fn create_contributor(
    new_contributor: NewContributor,
    connection: &Connection,
) -> Result<Contributor, Error> {
    if !trip_exists(new_contributor.trip_id, connection)? {
        return Err(Error::InvalidTrip(new_contributor.trip_id));
    }

    if find_contributor_by_name(new_contributor.trip_id, &new_contributor.name, connection)?
        .is_some()
    {
        return Err(Error::DuplicateContributorName(
            new_contributor.name.to_string(),
        ));
    }

    let now = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO contributor (trip_id, name, email, user_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            new_contributor.trip_id,
            new_contributor.name.as_ref(),
            new_contributor.email.as_deref(),
            new_contributor.user_id.as_deref(),
            now,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Contributor {
        id,
        trip_id: new_contributor.trip_id,
        name: new_contributor.name,
        email: new_contributor.email,
        user_id: new_contributor.user_id,
        created_at: now,
    })
}

/// Retrieve a single contributor by ID.
pub fn get_contributor(
    contributor_id: ContributorId,
    connection: &Connection,
) -> Result<Contributor, Error> {
    connection
        .prepare(&format!("{SELECT_CONTRIBUTOR} WHERE id = :id;"))?
        .query_row(&[(":id", &contributor_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the contributors of a trip in the order they were added.
pub fn get_contributors_for_trip(
    trip_id: TripId,
    connection: &Connection,
) -> Result<Vec<Contributor>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_CONTRIBUTOR} WHERE trip_id = :trip_id ORDER BY id ASC;"
        ))?
        .query_map(&[(":trip_id", &trip_id)], map_row)?
        .map(|maybe_contributor| maybe_contributor.map_err(|error| error.into()))
        .collect()
}

/// Get the trip's contributor called `name`, adding them to the trip if they do not exist yet.
pub fn find_or_create_contributor(
    trip_id: TripId,
    name: ContributorName,
    connection: &Connection,
) -> Result<Contributor, Error> {
    match find_contributor_by_name(trip_id, &name, connection)? {
        Some(contributor) => Ok(contributor),
        None => {
            tracing::debug!("Adding new contributor {name} to trip {trip_id}");
            create_contributor(NewContributor::with_name(trip_id, name), connection)
        }
    }
}

/// Delete a contributor by ID.
///
/// # Errors
///
/// Returns [Error::DeleteMissingContributor] if the contributor does not exist
/// and [Error::ContributorHasExpenses] if the contributor paid for any expense.
pub fn delete_contributor(
    contributor_id: ContributorId,
    connection: &Connection,
) -> Result<(), Error> {
    let contributor = match get_contributor(contributor_id, connection) {
        Ok(contributor) => contributor,
        Err(Error::NotFound) => return Err(Error::DeleteMissingContributor),
        Err(error) => return Err(error),
    };

    let expense_count: i64 = connection.query_row(
        "SELECT COUNT(1) FROM expense WHERE paid_by_contributor_id = ?1",
        [contributor_id],
        |row| row.get(0),
    )?;

    if expense_count > 0 {
        return Err(Error::ContributorHasExpenses(contributor.name.to_string()));
    }

    let rows_affected =
        connection.execute("DELETE FROM contributor WHERE id = ?1", [contributor_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingContributor);
    }

    Ok(())
}

/// Initialize the contributor table and indexes.
///
/// Requires the trip table.
pub fn create_contributor_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS contributor (
            id INTEGER PRIMARY KEY,
            trip_id INTEGER NOT NULL,
            name TEXT NOT NULL COLLATE NOCASE,
            email TEXT,
            user_id TEXT,
            created_at TEXT NOT NULL,
            UNIQUE(trip_id, name),
            FOREIGN KEY(trip_id) REFERENCES trip(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_contributor_trip_id ON contributor(trip_id);",
    )?;

    Ok(())
}

fn find_contributor_by_name(
    trip_id: TripId,
    name: &ContributorName,
    connection: &Connection,
) -> Result<Option<Contributor>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_CONTRIBUTOR} WHERE trip_id = ?1 AND name = ?2;"
        ))?
        .query_row((trip_id, name.as_ref()), map_row)
        .optional()
        .map_err(|error| error.into())
}

fn trip_exists(trip_id: TripId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM trip WHERE id = ?1)",
            [trip_id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<Contributor, rusqlite::Error> {
    let raw_name: String = row.get(2)?;

    Ok(Contributor {
        id: row.get(0)?,
        trip_id: row.get(1)?,
        name: ContributorName::new_unchecked(&raw_name),
        email: row.get(3)?,
        user_id: row.get(4)?,
        created_at: row.get(5)?,
    })
}
