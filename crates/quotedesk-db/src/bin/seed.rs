//! # Seed Data Generator
//!
//! Fills a development database with a small catalog and a few sample
//! quotes so the API has something to serve.
//!
//! ## Usage
//! ```bash
//! cargo run -p quotedesk-db --bin seed -- --items 40 --quotes 10 --db ./quotedesk_dev.db
//! ```

use anyhow::Context;
use chrono::{Duration, Utc};
use std::env;

use quotedesk_core::{ItemId, NewItem, NewLine, NewQuote};
use quotedesk_db::{Database, DbConfig};

/// Catalog descriptions with a base price in minor units.
const CATALOG: &[(&str, i64)] = &[
    ("Wireless mouse", 3500),
    ("USB-C cable 1m", 1000),
    ("Mechanical keyboard", 9500),
    ("27\" monitor", 28900),
    ("Laptop stand", 4200),
    ("Webcam 1080p", 5900),
    ("Noise-cancelling headset", 12900),
    ("Docking station", 18900),
    ("External SSD 1TB", 11900),
    ("Desk lamp", 2900),
];

const RECIPIENTS: &[&str] = &[
    "ACME Corp",
    "Globex",
    "Initech",
    "Umbrella Ltd",
    "Stark Industries",
    "Wayne Enterprises",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut item_count: usize = 20;
    let mut quote_count: usize = 5;
    let mut db_path = String::from("./quotedesk_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--items" | "-i" => {
                if i + 1 < args.len() {
                    item_count = args[i + 1].parse().unwrap_or(item_count);
                    i += 1;
                }
            }
            "--quotes" | "-q" => {
                if i + 1 < args.len() {
                    quote_count = args[i + 1].parse().unwrap_or(quote_count);
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
                println!("QuoteDesk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -i, --items <N>    Number of catalog items (default: 20)");
                println!("  -q, --quotes <N>   Number of sample quotes (default: 5)");
                println!("  -d, --db <PATH>    Database file path (default: ./quotedesk_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("QuoteDesk Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Items:    {}", item_count);
    println!("Quotes:   {}", quote_count);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("failed to open {}", db_path))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Catalog
    let mut item_ids: Vec<ItemId> = Vec::with_capacity(item_count);
    for seed in 0..item_count {
        let item = generate_item(seed)?;
        let stored = db.items().insert(&item).await?;
        item_ids.push(stored.id);
    }
    println!("✓ Inserted {} items", item_ids.len());

    if item_ids.is_empty() {
        println!("  No items, skipping quotes.");
        return Ok(());
    }

    // Quotes
    for seed in 0..quote_count {
        let quote = generate_quote(seed, &item_ids)?;
        let id = db.quotes().create(&quote).await?;

        if let Some(stored) = db.quotes().get_by_id(id).await? {
            println!(
                "  Quote #{:<4} {:<20} {:>2} lines  subtotal {:>10}  total {:>12.2}",
                id,
                stored.recipient_name,
                stored.line_count(),
                stored.subtotal(),
                stored.total_with_tax() / 100.0
            );
        }
    }
    println!("✓ Inserted {} quotes", quote_count);

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one catalog item; later rounds through the catalog get a variant
/// suffix and a price bump so descriptions stay distinct.
fn generate_item(seed: usize) -> anyhow::Result<NewItem> {
    let (name, base_price) = CATALOG[seed % CATALOG.len()];
    let round = seed / CATALOG.len();

    let description = if round == 0 {
        name.to_string()
    } else {
        format!("{} (v{})", name, round + 1)
    };
    let price = base_price + (round as i64) * 250;

    Ok(NewItem::new(&description, price)?)
}

/// Builds a quote with one to four lines drawn from `item_ids`.
fn generate_quote(seed: usize, item_ids: &[ItemId]) -> anyhow::Result<NewQuote> {
    let recipient = RECIPIENTS[seed % RECIPIENTS.len()];
    let created_at = Utc::now() - Duration::days(seed as i64);

    let line_count = 1 + seed % 4;
    let mut lines = Vec::with_capacity(line_count);
    for n in 0..line_count {
        let item_id = item_ids[(seed * 7 + n * 3) % item_ids.len()];
        let quantity = 1 + ((seed + n) % 5) as i64;
        lines.push(NewLine::new(item_id, quantity)?);
    }

    Ok(NewQuote::new(recipient, created_at, lines)?)
}
