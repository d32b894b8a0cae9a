//! Database operations for expenses.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    contributor::ContributorId,
    expense::{
        Expense, ExpenseId, ExpenseUpdate, NewExpense, validate_amount, validate_description,
    },
    identity::UserName,
    trip::TripId,
};

const SELECT_EXPENSE: &str = "SELECT id, trip_id, amount, description, paid_by_contributor_id, \
    created_by, created_at, updated_at FROM expense";

/// Create an expense and return it with its generated ID.
///
/// # Errors
///
/// Returns an error if the amount or description is invalid, the trip does
/// not exist ([Error::InvalidTrip]) or the paying contributor is not part of
/// the trip ([Error::InvalidContributor]).
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let amount = validate_amount(new_expense.amount)?;
    let description = validate_description(&new_expense.description)?;

    let trip_exists: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM trip WHERE id = ?1)",
        [new_expense.trip_id],
        |row| row.get(0),
    )?;

    if !trip_exists {
        return Err(Error::InvalidTrip(new_expense.trip_id));
    }

    check_contributor_in_trip(
        new_expense.paid_by_contributor_id,
        new_expense.trip_id,
        connection,
    )?;

    let now = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO expense
        (trip_id, amount, description, paid_by_contributor_id, created_by, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6);",
        (
            new_expense.trip_id,
            amount,
            &description,
            new_expense.paid_by_contributor_id,
            new_expense.created_by.as_ref(),
            now,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        trip_id: new_expense.trip_id,
        amount,
        description,
        paid_by_contributor_id: new_expense.paid_by_contributor_id,
        created_by: new_expense.created_by,
        created_at: now,
        updated_at: now,
    })
}

/// Retrieve a single expense by ID.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!("{SELECT_EXPENSE} WHERE id = :id;"))?
        .query_row(&[(":id", &expense_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the expenses of a trip, newest first.
pub fn get_expenses_for_trip(
    trip_id: TripId,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_EXPENSE} WHERE trip_id = :trip_id ORDER BY created_at DESC, id DESC;"
        ))?
        .query_map(&[(":trip_id", &trip_id)], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Change the amount, description and payer of an expense.
///
/// The expense stays in its trip, so the new payer must be a contributor of that trip.
///
/// # Errors
///
/// Returns [Error::UpdateMissingExpense] if the expense does not exist, along
/// with the validation errors of [create_expense].
pub fn update_expense(
    expense_id: ExpenseId,
    update: ExpenseUpdate,
    connection: &Connection,
) -> Result<(), Error> {
    let amount = validate_amount(update.amount)?;
    let description = validate_description(&update.description)?;

    let trip_id: TripId = match connection.query_row(
        "SELECT trip_id FROM expense WHERE id = ?1",
        [expense_id],
        |row| row.get(0),
    ) {
        Ok(trip_id) => trip_id,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(Error::UpdateMissingExpense),
        Err(error) => return Err(error.into()),
    };

    check_contributor_in_trip(update.paid_by_contributor_id, trip_id, connection)?;

    let rows_affected = connection.execute(
        "UPDATE expense
        SET amount = ?1, description = ?2, paid_by_contributor_id = ?3, updated_at = ?4
        WHERE id = ?5",
        (
            amount,
            &description,
            update.paid_by_contributor_id,
            OffsetDateTime::now_utc(),
            expense_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    Ok(())
}

/// Delete an expense by ID. Returns an error if the expense doesn't exist.
pub fn delete_expense(expense_id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [expense_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Initialize the expense table and indexes.
///
/// Requires the trip and contributor tables.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            trip_id INTEGER NOT NULL,
            amount REAL NOT NULL CHECK (amount >= 0),
            description TEXT NOT NULL,
            paid_by_contributor_id INTEGER NOT NULL,
            created_by TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(trip_id) REFERENCES trip(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(paid_by_contributor_id) REFERENCES contributor(id)
        );

        CREATE INDEX IF NOT EXISTS idx_expense_trip_id ON expense(trip_id);
        CREATE INDEX IF NOT EXISTS idx_expense_paid_by ON expense(paid_by_contributor_id);",
    )?;

    Ok(())
}

fn check_contributor_in_trip(
    contributor_id: ContributorId,
    trip_id: TripId,
    connection: &Connection,
) -> Result<(), Error> {
    let is_in_trip: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM contributor WHERE id = ?1 AND trip_id = ?2)",
        (contributor_id, trip_id),
        |row| row.get(0),
    )?;

    if is_in_trip {
        Ok(())
    } else {
        Err(Error::InvalidContributor(contributor_id))
    }
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let raw_created_by: String = row.get(5)?;

    Ok(Expense {
        id: row.get(0)?,
        trip_id: row.get(1)?,
        amount: row.get(2)?,
        description: row.get(3)?,
        paid_by_contributor_id: row.get(4)?,
        created_by: UserName::new(&raw_created_by),
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
