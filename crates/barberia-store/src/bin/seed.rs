//! # Seed Data Generator
//!
//! Populates the database with the demo barbershop for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p barberia-store --bin seed
//!
//! # Specify database path
//! cargo run -p barberia-store --bin seed -- --db ./data/barberia.db
//! ```
//!
//! ## Seeded Records
//! - Staff: Lucas Perez (60%), Kevin Diaz (50%)
//! - Services: Corte Clásico ($8000), Barba ($4000)
//! - Products: Cera Mate ($5000, stock 10, cost $2500, commission 10%)

use std::env;

use barberia_core::money::Money;
use barberia_core::types::CommissionRate;
use barberia_store::{Store, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug surfaces the store's structured logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./barberia_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Barbería Panel Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./barberia_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Barbería Panel Seed Data Generator");
    println!("=====================================");
    println!("Database: {}", db_path);
    println!();

    let store = Store::new(StoreConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to double-seed
    let existing = store.services().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} services", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding demo barbershop...");

    let lucas = store
        .staff()
        .create("Lucas", "Perez", CommissionRate::from_percent(60))
        .await?;
    let kevin = store
        .staff()
        .create("Kevin", "Diaz", CommissionRate::from_percent(50))
        .await?;
    println!("  Staff: {} (60%), {} (50%)", lucas.full_name(), kevin.full_name());

    let corte = store
        .services()
        .create("Corte Clásico", Money::from_units(8000))
        .await?;
    let barba = store
        .services()
        .create("Barba", Money::from_units(4000))
        .await?;
    println!(
        "  Services: {} ({}), {} ({})",
        corte.name, corte.unit_price, barba.name, barba.unit_price
    );

    let cera = store
        .products()
        .create(
            "Cera Mate",
            Money::from_units(5000),
            10,
            Money::from_units(2500),
            CommissionRate::from_percent(10),
        )
        .await?;
    println!(
        "  Products: {} ({}, stock {})",
        cera.name, cera.unit_price, cera.stock_count
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
