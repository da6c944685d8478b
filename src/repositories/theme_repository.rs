// src/repositories/theme_repository.rs
//
// Theme persistence, including the ordered theme -> element links

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Connection, Row};

use crate::db::ConnectionPool;
use crate::domain::{Image, Theme};
use crate::error::{AppError, AppResult};
use crate::repositories::element_repository::{row_to_element, ELEMENT_SELECT};
use crate::repositories::missing_reference;

#[cfg_attr(test, mockall::automock)]
pub trait ThemeRepository: Send + Sync {
    /// Enabled themes ordered by `sort`, each with its elements in theme order
    fn list_enabled(&self) -> AppResult<Vec<Theme>>;

    fn insert(
        &self,
        conn: &Connection,
        name: &str,
        image_id: Option<i64>,
        sort: i64,
    ) -> AppResult<i64>;

    /// Link an element (by external id) at `position`; `NotFound` if the element is missing
    fn link_element(
        &self,
        conn: &Connection,
        theme_id: i64,
        unique_id: &str,
        position: i64,
    ) -> AppResult<()>;

    fn set_enabled(&self, conn: &Connection, id: i64, enabled: bool) -> AppResult<()>;
}

pub struct SqliteThemeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteThemeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_theme(row: &Row) -> Result<Theme, rusqlite::Error> {
        let image_id: Option<i64> = row.get("image_id")?;
        let image_url: Option<String> = row.get("image_url")?;

        Ok(Theme {
            id: row.get("id")?,
            name: row.get("name")?,
            image: image_id.zip(image_url).map(|(id, url)| Image::new(id, url)),
            enabled: row.get("enabled")?,
            sort: row.get("sort")?,
            elements: Vec::new(),
        })
    }
}

impl ThemeRepository for SqliteThemeRepository {
    fn list_enabled(&self) -> AppResult<Vec<Theme>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT t.id, t.name, t.enabled, t.sort, i.id AS image_id, i.url AS image_url
             FROM theme t
             LEFT JOIN image i ON i.id = t.image_id
             WHERE t.enabled = 1
             ORDER BY t.sort, t.id",
        )?;
        let mut themes: Vec<Theme> = stmt
            .query_map([], Self::row_to_theme)?
            .collect::<Result<Vec<_>, _>>()?;

        let sql = format!(
            "{} JOIN theme_element te ON te.element_id = e.id
             WHERE te.theme_id = ?1
             ORDER BY te.position",
            ELEMENT_SELECT
        );
        let mut stmt = conn.prepare(&sql)?;

        for theme in themes.iter_mut() {
            theme.elements = stmt
                .query_map(params![theme.id], row_to_element)?
                .collect::<Result<Vec<_>, _>>()?;
        }

        Ok(themes)
    }

    fn insert(
        &self,
        conn: &Connection,
        name: &str,
        image_id: Option<i64>,
        sort: i64,
    ) -> AppResult<i64> {
        conn.execute(
            "INSERT INTO theme (name, image_id, enabled, sort, created_at)
             VALUES (?1, ?2, 1, ?3, ?4)",
            params![name, image_id, sort, Utc::now().to_rfc3339()],
        )
        .map_err(missing_reference)?;

        Ok(conn.last_insert_rowid())
    }

    fn link_element(
        &self,
        conn: &Connection,
        theme_id: i64,
        unique_id: &str,
        position: i64,
    ) -> AppResult<()> {
        let rows_affected = conn.execute(
            "INSERT INTO theme_element (theme_id, element_id, position)
             SELECT ?1, id, ?3 FROM element WHERE unique_id = ?2",
            params![theme_id, unique_id, position],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn set_enabled(&self, conn: &Connection, id: i64, enabled: bool) -> AppResult<()> {
        let rows_affected = conn.execute(
            "UPDATE theme SET enabled = ?2 WHERE id = ?1",
            params![id, enabled],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
