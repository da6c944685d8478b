// src/repositories/element_repository.rs
//
// Element persistence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::db::ConnectionPool;
use crate::domain::{Element, ElementCounter, Image, NewElement};
use crate::error::{AppError, AppResult};
use crate::repositories::missing_reference;

#[cfg_attr(test, mockall::automock)]
pub trait ElementRepository: Send + Sync {
    fn list_all(&self) -> AppResult<Vec<Element>>;
    fn list_hot(&self, limit: u32) -> AppResult<Vec<Element>>;
    fn list_by_hero(&self, hero_id: i64) -> AppResult<Vec<Element>>;
    fn list_by_hero_type(&self, type_id: i64) -> AppResult<Vec<Element>>;
    fn list_recommended(&self) -> AppResult<Vec<Element>>;
    fn get_by_unique_id(&self, unique_id: &str) -> AppResult<Option<Element>>;

    /// Insert inside the caller's transaction, returning the row id
    fn insert(&self, conn: &Connection, element: &NewElement) -> AppResult<i64>;

    /// Atomic `n = n + 1`; returns the new value, `NotFound` when no row matched
    fn increment_counter(
        &self,
        conn: &Connection,
        unique_id: &str,
        counter: ElementCounter,
    ) -> AppResult<u64>;

    fn delete(&self, conn: &Connection, unique_id: &str) -> AppResult<()>;
}

/// Columns selected for every element read; joins the owned image
pub(crate) const ELEMENT_SELECT: &str = "SELECT e.id, e.unique_id, e.hero_id, e.url, e.title,
            e.play_num, e.raise_num, e.duration, e.is_recommend, e.created_at,
            i.id AS image_id, i.url AS image_url
     FROM element e
     LEFT JOIN image i ON i.id = e.image_id";

/// Map a row selected with `ELEMENT_SELECT` to an Element
pub(crate) fn row_to_element(row: &Row) -> Result<Element, rusqlite::Error> {
    let image_id: Option<i64> = row.get("image_id")?;
    let image_url: Option<String> = row.get("image_url")?;
    let image = match (image_id, image_url) {
        (Some(id), Some(url)) => Some(Image::new(id, url)),
        _ => None,
    };

    let created_at_str: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let play_num: i64 = row.get("play_num")?;
    let raise_num: i64 = row.get("raise_num")?;
    let duration: i64 = row.get("duration")?;

    Ok(Element {
        id: row.get("id")?,
        unique_id: row.get("unique_id")?,
        hero_id: row.get("hero_id")?,
        url: row.get("url")?,
        title: row.get("title")?,
        image,
        play_num: play_num.max(0) as u64,
        raise_num: raise_num.max(0) as u64,
        duration: duration.clamp(0, u32::MAX as i64) as u32,
        is_recommend: row.get("is_recommend")?,
        created_at,
    })
}

pub struct SqliteElementRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteElementRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn query_list(&self, clause: &str, params: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<Element>> {
        let conn = self.pool.get()?;

        let sql = format!("{} {}", ELEMENT_SELECT, clause);
        let mut stmt = conn.prepare(&sql)?;

        let elements: Vec<Element> = stmt
            .query_map(params, row_to_element)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(elements)
    }
}

impl ElementRepository for SqliteElementRepository {
    fn list_all(&self) -> AppResult<Vec<Element>> {
        self.query_list("ORDER BY e.created_at DESC, e.id DESC", &[])
    }

    fn list_hot(&self, limit: u32) -> AppResult<Vec<Element>> {
        self.query_list(
            "ORDER BY e.play_num DESC, e.id DESC LIMIT ?1",
            &[&(limit as i64)],
        )
    }

    fn list_by_hero(&self, hero_id: i64) -> AppResult<Vec<Element>> {
        self.query_list(
            "WHERE e.hero_id = ?1 ORDER BY e.created_at DESC, e.id DESC",
            &[&hero_id],
        )
    }

    fn list_by_hero_type(&self, type_id: i64) -> AppResult<Vec<Element>> {
        self.query_list(
            "JOIN hero h ON h.id = e.hero_id
             WHERE h.type_id = ?1
             ORDER BY e.created_at DESC, e.id DESC",
            &[&type_id],
        )
    }

    fn list_recommended(&self) -> AppResult<Vec<Element>> {
        self.query_list(
            "WHERE e.is_recommend = 1 ORDER BY e.created_at DESC, e.id DESC",
            &[],
        )
    }

    fn get_by_unique_id(&self, unique_id: &str) -> AppResult<Option<Element>> {
        let conn = self.pool.get()?;

        let sql = format!("{} WHERE e.unique_id = ?1", ELEMENT_SELECT);
        let mut stmt = conn.prepare(&sql)?;

        match stmt.query_row(params![unique_id], row_to_element) {
            Ok(element) => Ok(Some(element)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn insert(&self, conn: &Connection, element: &NewElement) -> AppResult<i64> {
        conn.execute(
            "INSERT INTO element (
                unique_id, hero_id, url, title, image_id,
                play_num, raise_num, duration, is_recommend, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, 0, 0, ?6, ?7, ?8)",
            params![
                element.unique_id,
                element.hero_id,
                element.url,
                element.title,
                element.image_id,
                element.duration as i64,
                element.is_recommend,
                element.created_at.to_rfc3339(),
            ],
        )
        .map_err(missing_reference)?;

        Ok(conn.last_insert_rowid())
    }

    fn increment_counter(
        &self,
        conn: &Connection,
        unique_id: &str,
        counter: ElementCounter,
    ) -> AppResult<u64> {
        let column = counter.column();

        let rows_affected = conn.execute(
            &format!(
                "UPDATE element SET {column} = {column} + 1 WHERE unique_id = ?1",
                column = column
            ),
            params![unique_id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        let value: i64 = conn.query_row(
            &format!("SELECT {} FROM element WHERE unique_id = ?1", column),
            params![unique_id],
            |row| row.get(0),
        )?;

        Ok(value.max(0) as u64)
    }

    fn delete(&self, conn: &Connection, unique_id: &str) -> AppResult<()> {
        let rows_affected = conn.execute(
            "DELETE FROM element WHERE unique_id = ?1",
            params![unique_id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
