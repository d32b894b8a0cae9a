//! Database operations for trips.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    identity::UserName,
    trip::{NewTrip, Trip, TripId, TripName},
};

/// Create a trip and return it with its generated ID.
pub fn create_trip(new_trip: NewTrip, connection: &Connection) -> Result<Trip, Error> {
    let now = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO trip (name, description, created_by, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?4);",
        (
            new_trip.name.as_ref(),
            new_trip.description.as_deref(),
            new_trip.created_by.as_ref(),
            now,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Trip {
        id,
        name: new_trip.name,
        description: new_trip.description,
        created_by: new_trip.created_by,
        created_at: now,
        updated_at: now,
    })
}

/// Retrieve a single trip by ID.
pub fn get_trip(trip_id: TripId, connection: &Connection) -> Result<Trip, Error> {
    connection
        .prepare(
            "SELECT id, name, description, created_by, created_at, updated_at
            FROM trip WHERE id = :id;",
        )?
        .query_row(&[(":id", &trip_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all trips, newest first.
pub fn get_all_trips(connection: &Connection) -> Result<Vec<Trip>, Error> {
    connection
        .prepare(
            "SELECT id, name, description, created_by, created_at, updated_at
            FROM trip ORDER BY created_at DESC, id DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_trip| maybe_trip.map_err(|error| error.into()))
        .collect()
}

/// Update a trip's name and description. Returns an error if the trip doesn't exist.
pub fn update_trip(
    trip_id: TripId,
    new_name: TripName,
    new_description: Option<String>,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE trip SET name = ?1, description = ?2, updated_at = ?3 WHERE id = ?4",
        (
            new_name.as_ref(),
            new_description.as_deref(),
            OffsetDateTime::now_utc(),
            trip_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTrip);
    }

    Ok(())
}

/// Delete a trip by ID along with its contributors and expenses.
///
/// Returns an error if the trip doesn't exist.
pub fn delete_trip(trip_id: TripId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM trip WHERE id = ?1", [trip_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTrip);
    }

    Ok(())
}

/// Initialize the trip table.
pub fn create_trip_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS trip (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            created_by TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_trip_created_at ON trip(created_at);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Trip, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let description = row.get(2)?;
    let raw_created_by: String = row.get(3)?;
    let created_at = row.get(4)?;
    let updated_at = row.get(5)?;

    Ok(Trip {
        id,
        name: TripName::new_unchecked(&raw_name),
        description,
        created_by: UserName::new(&raw_created_by),
        created_at,
        updated_at,
    })
}
