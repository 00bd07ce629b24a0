//! # Demo Data Generator
//!
//! Builds a small catalog, runs a few orders through it and writes it out in
//! both formats, then reloads each file and checks that nothing was lost.
//!
//! ## Usage
//! ```bash
//! # Write into the configured data dir
//! cargo run -p bookstore-store --bin seed
//!
//! # Write somewhere else
//! cargo run -p bookstore-store --bin seed -- --data-dir ./data
//!
//! # More logging
//! RUST_LOG=debug cargo run -p bookstore-store --bin seed
//! ```

use bookstore_core::{BookStore, Money};
use bookstore_store::{Storage, StorageConfig, StorageFormat, StoreResult};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// (name, country, birthday)
const AUTHORS: &[(&str, &str, Option<&str>)] = &[
    ("Leo Tolstoy", "Russia", Some("1828-09-09")),
    ("Fyodor Dostoevsky", "Russia", Some("1821-11-11")),
    ("Anton Chekhov", "Russia", None),
];

/// (title, author index, price in cents, genre)
const BOOKS: &[(&str, usize, i64, &str)] = &[
    ("War and Peace", 0, 50000, "Novel"),
    ("Crime and Punishment", 1, 45000, "Novel"),
    ("The Cherry Orchard", 2, 30000, "Play"),
];

/// (name, email, opening balance in cents)
const CUSTOMERS: &[(&str, &str, i64)] = &[
    ("Ivan Ivanov", "ivan@mail.ru", 200000),
    ("Petr Petrov", "petr@mail.ru", 150000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut data_dir: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bookstore Demo Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data-dir <DIR>  Directory to write into (default: configured data dir)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let mut config = StorageConfig::load_or_default(None);
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    println!("Bookstore Demo Data Generator");
    println!("=============================");
    println!("Data dir: {}", config.data_dir.display());
    println!();

    let store = build_demo_catalog()?;
    println!(
        "✓ Built catalog: {} authors, {} books, {} customers, {} orders",
        store.authors().count(),
        store.books().count(),
        store.customers().count(),
        store.orders().count()
    );
    for customer in store.customers() {
        println!("  {} balance {}", customer.name(), customer.balance());
    }

    let mut all_match = true;
    for format in [StorageFormat::Json, StorageFormat::Xml] {
        let storage = Storage::new(config.clone().format(format))?;
        storage.save(&store).await?;
        let reloaded = storage.load().await?;

        let matches = reloaded.to_snapshot() == store.to_snapshot();
        all_match &= matches;
        println!(
            "{} {} -> {}",
            if matches { "✓" } else { "✗" },
            format,
            storage.data_file().display()
        );
    }

    println!();
    if all_match {
        println!("✓ Both files reload to the same catalog");
    } else {
        println!("⚠ Reloaded catalog differs from the original");
        std::process::exit(1);
    }

    Ok(())
}

/// Authors, books and customers from the tables above, plus three orders:
/// two processed and one cancelled after processing.
fn build_demo_catalog() -> StoreResult<BookStore> {
    let mut store = BookStore::new();

    let authors: Vec<_> = AUTHORS
        .iter()
        .map(|(name, country, birthday)| {
            store.add_author(*name, Some(*country), *birthday).id()
        })
        .collect();

    let mut books = Vec::with_capacity(BOOKS.len());
    for (title, author, price, genre) in BOOKS {
        let book = store.add_book(
            *title,
            authors[*author],
            Money::from_cents(*price),
            Some(*genre),
        )?;
        books.push(book.id());
    }

    let customers: Vec<_> = CUSTOMERS
        .iter()
        .map(|(name, email, balance)| {
            store
                .add_customer(*name, *email, Money::from_cents(*balance))
                .id()
        })
        .collect();

    let first = store.create_order(customers[0], &[books[0], books[1]])?.id();
    let processed = store.process_order(first)?;
    info!(order = %first, processed, "Processed first order");

    let second = store.create_order(customers[1], &[books[2]])?.id();
    store.process_order(second)?;

    let third = store.create_order(customers[1], &[books[0]])?.id();
    store.process_order(third)?;
    store.cancel_order(third)?;
    info!(order = %third, "Cancelled with refund");

    Ok(store)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookstore_store=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
