//! # Seed Data Generator
//!
//! Populates the database with sample products and orders for development.
//!
//! ## Usage
//! ```bash
//! # 20 products, 200 orders through the mapped strategy (default)
//! cargo run -p depot-db --bin seed
//!
//! # Custom amounts through the tracked strategy
//! cargo run -p depot-db --bin seed -- --products 50 --orders 1000 --strategy tracked
//!
//! # Specify database path
//! cargo run -p depot-db --bin seed -- --db ./data/depot.db
//! ```
//!
//! ## Generated Data
//! - Products named `{KIND} {SIZE}` with deterministic dimensions
//! - Orders spread over 2022-2024, cycling through the known statuses and
//!   referencing products round-robin
//!
//! Set `RUST_LOG=depot_db=debug` to see every statement the repositories run.

use std::env;
use std::time::Instant;

use chrono::{TimeZone, Utc};
use depot_core::{Order, OrderFilter, Product};
use depot_db::{Database, DbConfig, Strategy};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Product kinds for realistic test data
const KINDS: &[&str] = &[
    "Crate", "Pallet", "Carton", "Drum", "Tote", "Bin", "Sack", "Case", "Tube", "Envelope",
];

/// Sizes with a scale factor applied to the base dimensions
const SIZES: &[(&str, i64)] = &[("Small", 1), ("Medium", 2), ("Large", 4)];

const STATUSES: &[&str] = &["Not Started", "In Progress", "Completed"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut product_count: usize = 20;
    let mut order_count: usize = 200;
    let mut strategy = Strategy::Mapped;
    let mut db_path = String::from("./depot_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--products" | "-p" => {
                if i + 1 < args.len() {
                    product_count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--orders" | "-o" => {
                if i + 1 < args.len() {
                    order_count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--strategy" | "-s" => {
                if i + 1 < args.len() {
                    strategy = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Depot Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --products <N>       Number of products to generate (default: 20)");
                println!("  -o, --orders <N>         Number of orders to generate (default: 200)");
                println!("  -s, --strategy <NAME>    mapped | tracked (default: mapped)");
                println!("  -d, --db <PATH>          Database file path (default: ./depot_dev.db)");
                println!("  -h, --help               Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Depot Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Strategy: {}", strategy);
    println!("Products: {}", product_count);
    println!("Orders:   {}", order_count);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;
    let repos = db.repositories(strategy);

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = repos.products.list_all().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");
    let start = Instant::now();

    for seed in 0..product_count {
        let product = generate_product(seed);
        if let Err(e) = repos.products.add(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
        }
    }

    let products = repos.products.list_all().await?;
    if products.is_empty() {
        println!("⚠ No products stored, skipping orders.");
        return Ok(());
    }

    println!("Generating orders...");

    let mut generated = 0;
    for seed in 0..order_count {
        let product_id = products[seed % products.len()].id;
        let order = generate_order(seed, product_id);

        if let Err(e) = repos.orders.add(&order).await {
            eprintln!("Failed to insert order {}: {}", seed, e);
            continue;
        }

        generated += 1;

        if generated % 100 == 0 {
            println!("  Generated {} orders...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} products and {} orders in {:?}",
        products.len(),
        generated,
        elapsed
    );

    // Summarize through the filtered query
    println!();
    println!("Orders by status:");
    for status in STATUSES {
        let matching = repos
            .orders
            .get_by_filter(&OrderFilter::new().status(*status))
            .await?;
        println!("  {:<12} {}", status, matching.len());
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with deterministic dimensions.
fn generate_product(seed: usize) -> Product {
    let kind = KINDS[seed % KINDS.len()];
    let (size, scale) = SIZES[(seed / KINDS.len()) % SIZES.len()];
    let variant = seed / (KINDS.len() * SIZES.len());

    let name = if variant == 0 {
        format!("{} {}", kind, size)
    } else {
        format!("{} {} #{}", kind, size, variant + 1)
    };

    let step = (seed % 7) as i64;

    // Base dimensions in tenths, scaled by size
    let weight = Decimal::new((15 + step * 5) * scale, 1);
    let height = Decimal::new((100 + step * 10) * scale, 1);
    let width = Decimal::new((50 + step * 10) * scale, 1);
    let length = Decimal::new((200 + step * 15) * scale, 1);

    Product::new(name)
        .with_description(format!("{} {} for general storage", size, kind.to_lowercase()))
        .with_dimensions(weight, height, width, length)
}

/// Generates an order spread over 2022-2024.
fn generate_order(seed: usize, product_id: i64) -> Order {
    let year = 2022 + (seed % 3) as i32;
    let month = 1 + (seed % 12) as u32;
    let day = 1 + (seed % 28) as u32;
    let hour = (seed % 24) as u32;

    let created = Utc
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    let mut order = Order::new(STATUSES[seed % STATUSES.len()], product_id, created);
    if order.status != STATUSES[0] {
        order.updated_date = created + chrono::Duration::days(1 + (seed % 5) as i64);
    }
    order
}
