//! # Seed Data Generator
//!
//! Populates the database with demo catalog data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p warung-db --bin seed
//!
//! # Specify database path
//! cargo run -p warung-db --bin seed -- --db ./data/warung.db
//! ```
//!
//! Seeds a realistic small-shop catalog (drinks, instant food, staples,
//! toiletries) plus the suppliers they come from. Skips seeding if the
//! database already has products.

use std::env;
use warung_core::Money;
use warung_db::{Database, DbConfig, NewProduct, NewSupplier};

/// Demo suppliers: (name, contact person, phone, address)
const SUPPLIERS: &[(&str, &str, &str, &str)] = &[
    (
        "PD Sinar Jaya",
        "Pak Budi",
        "0812-3456-7890",
        "Pasar Induk Blok C No. 12",
    ),
    (
        "CV Tani Makmur",
        "Bu Sari",
        "0813-9876-5432",
        "Jl. Raya Bogor KM 28",
    ),
    (
        "Toko Grosir Berkah",
        "Pak Dedi",
        "0857-1122-3344",
        "Jl. Pasar Baru No. 4",
    ),
];

/// Demo products: (name, category, price, cost, stock, min_stock, supplier index)
const PRODUCTS: &[(&str, &str, i64, i64, i64, i64, usize)] = &[
    ("Indomie Goreng", "Makanan", 3_500, 2_800, 48, 12, 0),
    ("Indomie Soto", "Makanan", 3_500, 2_800, 36, 12, 0),
    ("Aqua 600ml", "Minuman", 4_000, 2_500, 24, 6, 0),
    ("Teh Botol Sosro", "Minuman", 5_000, 3_500, 18, 6, 0),
    ("Kopi Kapal Api Sachet", "Minuman", 2_000, 1_400, 60, 20, 2),
    ("Beras 5kg", "Sembako", 68_000, 61_000, 10, 2, 1),
    ("Minyak Goreng 1L", "Sembako", 18_000, 15_500, 12, 3, 1),
    ("Gula Pasir 1kg", "Sembako", 16_000, 14_000, 15, 4, 1),
    ("Telur Ayam 1kg", "Sembako", 28_000, 25_000, 8, 3, 1),
    ("Sabun Lifebuoy", "Toiletries", 5_500, 4_200, 20, 5, 2),
    ("Shampoo Sachet", "Toiletries", 1_000, 700, 80, 30, 2),
    ("Rokok Surya 12", "Rokok", 28_000, 26_000, 10, 4, 2),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./warung.db");

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
                println!("Warung POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./warung.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Warung POS Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding suppliers...");
    for (name, contact, phone, address) in SUPPLIERS {
        db.suppliers()
            .insert(&NewSupplier {
                name: name.to_string(),
                contact_person: Some(contact.to_string()),
                phone: Some(phone.to_string()),
                email: None,
                address: Some(address.to_string()),
                notes: None,
            })
            .await?;
    }
    println!("✓ {} suppliers", SUPPLIERS.len());

    println!("Seeding products...");
    for (name, category, price, cost, stock, min_stock, supplier_idx) in PRODUCTS {
        db.products()
            .insert(&NewProduct {
                name: name.to_string(),
                category: category.to_string(),
                price: Money::new(*price),
                cost: Money::new(*cost),
                stock: *stock,
                min_stock: *min_stock,
                supplier: Some(SUPPLIERS[*supplier_idx].0.to_string()),
            })
            .await?;
    }
    println!("✓ {} products", PRODUCTS.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
