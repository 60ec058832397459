//! Configuration-driven database example.
//!
//! Writes a YAML configuration to a temporary directory, loads it, and
//! opens the database it describes. The strict mapping policy in the file
//! makes a query with an unmapped result column fail.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p neat-demos --example yaml_config
//! ```

use neat_core::{Value, record};
use neat_sqlite::{Database, NeatConfig};

record! {
    #[derive(Debug, Default)]
    pub struct Product {
        pub sku: String => "sku,TEXT PRIMARY KEY",
        pub price: f64 => "price,DECIMAL(10,2) NOT NULL",
        pub discontinued: bool => ",INTEGER NOT NULL DEFAULT 0",
    }
}

fn main() {
    // === Step 1: Write a configuration file ===
    let dir = std::env::temp_dir().join("neat_yaml_config_example");
    std::fs::create_dir_all(&dir).unwrap();
    let db_path = dir.join("products.db");
    let _ = std::fs::remove_file(&db_path);

    let config_path = dir.join("neat.yml");
    let yaml = [
        "driver: sqlite".to_string(),
        format!("path: {}", db_path.display()),
        "busy_timeout_ms: 2000".to_string(),
        "mapping:".to_string(),
        "  unmapped_fields: reject".to_string(),
        "  unmatched_columns: reject".to_string(),
    ]
    .join("\n");
    std::fs::write(&config_path, yaml).unwrap();
    println!("Wrote {}", config_path.display());

    // === Step 2: Load it and open the database ===
    let config = NeatConfig::load(&config_path).unwrap();
    println!("Config: {config:?}");
    let db = Database::open(&config).unwrap();

    db.create_table::<Product>().unwrap();
    db.insert(&Product {
        sku: "A-100".to_string(),
        price: 19.99,
        discontinued: false,
    })
    .unwrap();

    let product = db
        .select_one(
            "SELECT sku, price, discontinued FROM PRODUCT WHERE sku=?",
            Product::default,
            &[Value::from("A-100")],
        )
        .unwrap();
    println!("Loaded: {product:?}");

    // === Step 3: Strict policy rejects unmatched result columns ===
    let err = db
        .select_all("SELECT sku, 1 AS extra FROM PRODUCT", Product::default, &[])
        .unwrap_err();
    println!("Rejected: {err}");

    let _ = std::fs::remove_dir_all(&dir);
}
