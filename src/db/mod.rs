// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema initialisation
// - Scoped write transactions

pub mod connection;
pub mod migrations;
pub mod transaction;

pub use connection::{
    create_connection_pool, default_database_path, get_connection, ConnectionPool, PooledConn,
};
pub use migrations::{initialize_database, verify_database_integrity};
pub use transaction::begin_transaction;

/// Fresh, initialised database in a temporary directory
#[cfg(test)]
pub(crate) fn test_pool() -> (tempfile::TempDir, std::sync::Arc<ConnectionPool>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let pool = create_connection_pool(&dir.path().join("test.db"), 4).expect("pool");
    {
        let conn = pool.get().expect("connection");
        initialize_database(&conn).expect("schema");
    }
    (dir, std::sync::Arc::new(pool))
}
