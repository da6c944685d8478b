// src/repositories/image_repository.rs
//
// Image rows are only ever written inside a caller's transaction, so the
// repository holds no pool of its own.

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait ImageRepository: Send + Sync {
    fn insert(&self, conn: &Connection, url: &str) -> AppResult<i64>;
}

#[derive(Debug, Default)]
pub struct SqliteImageRepository;

impl SqliteImageRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ImageRepository for SqliteImageRepository {
    fn insert(&self, conn: &Connection, url: &str) -> AppResult<i64> {
        conn.execute(
            "INSERT INTO image (url, created_at) VALUES (?1, ?2)",
            params![url, Utc::now().to_rfc3339()],
        )?;

        Ok(conn.last_insert_rowid())
    }
}
