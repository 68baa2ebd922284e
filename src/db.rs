//! Database connection pool, migration management, and demo seeding.
//!
//! This module provides utilities for:
//! - Creating and managing a SQLite connection pool
//! - Running database migrations automatically
//! - Seeding an empty database with a fixed demonstration dataset

use std::str::FromStr;

use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Type alias for the SQLite connection pool.
///
/// Instead of writing `Pool<Sqlite>` everywhere, we can use `DbPool`.
pub type DbPool = Pool<Sqlite>;

/// Create a new SQLite connection pool.
///
/// A connection pool maintains multiple database connections that can be reused across HTTP requests which is much more efficient than opening a new connection for each request.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (e.g. `sqlite:retail.db`)
///
/// # Configuration
///
/// - Maximum connections: 5
/// - The database file is created when missing
/// - Foreign key enforcement is switched on for every connection
///   (SQLite leaves it off unless asked)
///
/// # Errors
///
/// Returns an error if:
/// - The connection string is invalid
/// - The database file cannot be created or opened
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        // Limit concurrent connections
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// This function executes all SQL migration files in order. Migrations are tracked in a special `_sqlx_migrations` table, so each migration runs only once; the schema statements themselves are also `CREATE TABLE IF NOT EXISTS`, making startup idempotent either way.
///
/// # Errors
///
/// Returns an error if:
/// - Migration files cannot be read
/// - SQL syntax errors in migration files
/// - Database errors during migration execution
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // The macro reads migrations at compile time from ./migrations directory
    sqlx::migrate!("./migrations").run(pool).await
}

/// Seed the fixed demonstration dataset.
///
/// Only runs against an empty database: if any customer exists the seed is
/// skipped, so restarting with `SEED_DEMO=true` never duplicates rows.
/// Loans are seeded with `balance = loan_amount` (no payments recorded yet).
pub async fn seed_demo_data(pool: &DbPool) -> Result<(), sqlx::Error> {
    let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await?;

    if customers > 0 {
        tracing::debug!("database already populated, skipping demo seed");
        return Ok(());
    }

    let statements = [
        "INSERT INTO customers (cust_id, name, email, phone, city)
         VALUES ('C001', 'Ramesh Kumar', 'ramesh@example.com', '9876543210', 'Pune')",
        "INSERT INTO customers (cust_id, name, email, phone, city)
         VALUES ('C002', 'Anita Sharma', 'anita@example.com', '9822001122', 'Mumbai')",
        "INSERT INTO suppliers (supplier_id, name, email, phone, city)
         VALUES ('S001', 'Gupta Traders', 'sales@guptatraders.example', '9000000001', 'Pune')",
        "INSERT INTO suppliers (supplier_id, name, email, phone, city)
         VALUES ('S002', 'Metro Wholesale', 'orders@metrowholesale.example', '9000000002', 'Nashik')",
        "INSERT INTO products (product_id, name, description, price, quantity_stock, supplier_id)
         VALUES ('P001', 'Basmati Rice 5kg', 'Long grain rice', 550, 40, 'S001')",
        "INSERT INTO products (product_id, name, description, price, quantity_stock, supplier_id)
         VALUES ('P002', 'Sunflower Oil 1L', NULL, 160, 25, 'S001')",
        "INSERT INTO products (product_id, name, description, price, quantity_stock, supplier_id)
         VALUES ('P003', 'Washing Powder 2kg', NULL, 220, 18, 'S002')",
        "INSERT INTO invoices (invoice_id, cust_id, date, total_amt)
         VALUES ('INV001', 'C001', '2025-05-02', 1100)",
        "INSERT INTO loans (loan_id, cust_id, loan_amount, interest_rate, balance, date)
         VALUES ('L001', 'C001', 8000, 2.5, 8000, '2025-04-15')",
        "INSERT INTO loans (loan_id, cust_id, loan_amount, interest_rate, balance, date)
         VALUES ('L002', 'C002', 15000, 3.0, 15000, '2025-05-20')",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("seeded demonstration dataset");
    Ok(())
}
