//! Record lifecycle example.
//!
//! Declares a `Client` record, prints the statements generated for it by
//! each driver, then creates, inserts, updates, and selects it against an
//! in-memory SQLite database.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p neat-demos --example client_crud
//! ```

use neat_core::{Driver, StatementBuilder, Value, record, validate_record};
use neat_sqlite::{Database, SqliteError};

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Client {
        pub id: i64 => "id,INT PRIMARY KEY",
        pub name: String => "name,VARCHAR(100) NOT NULL",
        pub address: String => "address,TEXT NOT NULL",
    }
}

fn main() {
    // === Step 1: Validate the mapping ===
    let problems = validate_record::<Client>();
    println!("=== Validation ===");
    println!("Problems found: {}", problems.len());

    // === Step 2: Inspect generated statements ===
    let john = Client {
        id: 1,
        name: "John Doe".to_string(),
        ..Default::default()
    };
    for driver in [Driver::Sqlite, Driver::Postgres] {
        let builder = StatementBuilder::new(driver);
        println!("\n=== {driver:?} statements ===");
        print!("{}", builder.create_table::<Client>().unwrap().sql);
        println!("{}", builder.insert(&john).unwrap().sql);
        println!("{}", builder.update(&john, "id", john.id).unwrap().sql);
    }

    // === Step 3: Run them against SQLite ===
    println!("\n=== Lifecycle ===");
    let db = Database::open_in_memory(Driver::Sqlite).unwrap();
    db.create_table::<Client>().unwrap();

    let result = db.insert(&john).unwrap();
    println!("Inserted rowid {}", result.last_insert_rowid);

    let query = "SELECT id, name FROM CLIENT WHERE id=?";
    let loaded = db
        .select_one(query, Client::default, &[Value::Integer(1)])
        .unwrap();
    println!("Loaded: {loaded:?}");

    let mut renamed = loaded;
    renamed.name = "Mary Jane".to_string();
    let result = db.update(&renamed, "id", renamed.id).unwrap();
    println!("Updated {} row(s)", result.rows_affected);

    let all = db
        .select_all("SELECT id, name, address FROM CLIENT", Client::default, &[])
        .unwrap();
    println!("All clients: {all:?}");

    // === Step 4: A miss is an error for select_one ===
    match db.select_one(query, Client::default, &[Value::Integer(2)]) {
        Err(err @ SqliteError::RecordNotFound { .. }) => println!("\n{err}"),
        other => println!("\nUnexpected: {other:?}"),
    }
}
