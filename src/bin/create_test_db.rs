use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use tripsplit::{
    ContributorName, NewContributor, NewExpense, NewTrip, TripName, UserName, create_contributor,
    create_expense, create_trip, initialize_db,
};

/// A utility for creating a test database for the tripsplit server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test trip...");

    let created_by = UserName::new("test");
    let trip = create_trip(
        NewTrip {
            name: TripName::new("Beach Weekend")?,
            description: Some("Two nights at the bach".to_owned()),
            created_by: created_by.clone(),
        },
        &conn,
    )?;

    let mut contributors = Vec::new();
    for name in ["Alice", "Bob", "Charlie"] {
        let contributor = create_contributor(
            NewContributor::with_name(trip.id, ContributorName::new(name)?),
            &conn,
        )?;
        contributors.push(contributor);
    }

    let expenses = [
        (120.0, "Groceries", 0),
        (60.0, "Petrol", 1),
        (45.5, "Fish and chips", 0),
        (30.0, "Firewood", 2),
    ];

    println!("Creating {} test expenses...", expenses.len());

    for (amount, description, payer_index) in expenses {
        create_expense(
            NewExpense {
                trip_id: trip.id,
                amount,
                description: description.to_owned(),
                paid_by_contributor_id: contributors[payer_index].id,
                created_by: created_by.clone(),
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
