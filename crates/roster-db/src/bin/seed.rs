//! # Seed Data Generator
//!
//! Populates the database with sample employees for development.
//!
//! ## Usage
//! ```bash
//! # Generate 25 employees (default)
//! cargo run -p roster-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p roster-db --bin seed -- --count 100
//!
//! # Specify database path (default: $ROSTER_DB_PATH or ./roster.db)
//! cargo run -p roster-db --bin seed -- --db ./data/roster.db
//! ```
//!
//! Running it again on a populated database continues numbering after the
//! largest stored id instead of colliding with it.

use roster_core::{EmployeeDraft, EmployeeIdPool};
use roster_db::{Store, StoreConfig};
use std::env;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// First names for sample data
const NAMES: &[&str] = &[
    "Ann", "Bob", "Carla", "Dev", "Elif", "Farid", "Grace", "Hiro", "Ines", "Jonas", "Kemi",
    "Lars", "Mina", "Noor", "Otto", "Priya",
];

/// Departments for sample data
const DEPARTMENTS: &[&str] = &["Engineering", "Sales", "Support", "Finance", "Operations"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 25;
    let mut config = StoreConfig::from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(25);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Roster Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of employees to generate (default: 25)");
                println!("  -d, --db <PATH>    Database file path (default: ./roster.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Roster Seed Data Generator");
    println!("==========================");
    println!("Database:  {}", config.database_path.display());
    println!("Employees: {}", count);
    println!();

    let mut store = Store::connect(config).await?;
    println!("✓ Connected to database");
    println!("✓ Schema ready");

    let existing = store.fetch_all().await?;
    let mut ids = EmployeeIdPool::resume_after(&existing)?;
    if !existing.is_empty() {
        println!("  {} employees already stored, continuing numbering", existing.len());
    }

    let mut generated = 0;
    for seed in 0..count {
        let draft = sample_draft(seed);
        let employee = draft.into_employee(None, &mut ids)?;

        if let Err(e) = store.insert(&employee).await {
            warn!(id = employee.id(), error = %e, "Failed to insert employee");
            continue;
        }
        generated += 1;
    }

    println!("✓ Generated {} employees", generated);
    println!();

    for employee in store.fetch_all().await? {
        println!("{}", employee.describe_row());
    }

    store.close().await;
    Ok(())
}

/// Builds one sample employee deterministically from `seed`.
fn sample_draft(seed: usize) -> EmployeeDraft {
    let name = NAMES[seed % NAMES.len()];
    let department = DEPARTMENTS[(seed / NAMES.len() + seed) % DEPARTMENTS.len()];
    let age = 21 + (seed * 7 % 45) as i32;

    EmployeeDraft {
        name: name.to_string(),
        age,
        department: department.to_string(),
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, debug for roster crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,roster=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
