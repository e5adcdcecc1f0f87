/// Database test utilities with singleton pattern
///
/// Provides thread-safe access to the test database with proper isolation
use diesel::prelude::*;
use std::sync::{Arc, Mutex, OnceLock};
use subscription_lib::shared::Database;

static DATABASE: OnceLock<Arc<Database>> = OnceLock::new();

/// Get or create the singleton database for tests, migrated to the latest schema
pub fn get_test_database() -> Arc<Database> {
    DATABASE
        .get_or_init(|| {
            dotenvy::dotenv().ok();
            let test_db_url = std::env::var("TEST_DATABASE_URL")
                .expect("TEST_DATABASE_URL must be set in .env for tests");

            let database = Database::new(&test_db_url, 5).expect("Failed to create test database");
            database
                .run_migrations()
                .expect("Failed to run migrations on test database");
            Arc::new(database)
        })
        .clone()
}

/// Clean the subscription table - use at the start of each test
pub fn clean_test_db() {
    let database = get_test_database();
    let mut conn = database.get_connection().expect("Failed to get DB connection");

    diesel::sql_query("TRUNCATE TABLE subscription RESTART IDENTITY CASCADE")
        .execute(&mut conn)
        .expect("Failed to clean subscription");
}

/// Global test mutex for serialization
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Acquire test lock to ensure tests run serially
/// Returns a guard that releases the lock when dropped
pub fn acquire_test_lock() -> std::sync::MutexGuard<'static, ()> {
    // Handle poisoned mutex by recovering from panic
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
