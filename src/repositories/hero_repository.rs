// src/repositories/hero_repository.rs
//
// Hero and hero type persistence

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Connection, Row};

use crate::db::ConnectionPool;
use crate::domain::{Hero, HeroType, Image};
use crate::error::{AppError, AppResult};
use crate::repositories::missing_reference;

/// Partial hero update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroChanges {
    pub name: Option<String>,
    pub type_id: Option<i64>,
    pub image_id: Option<i64>,
}

#[cfg_attr(test, mockall::automock)]
pub trait HeroRepository: Send + Sync {
    fn list_by_type(&self, type_id: i64) -> AppResult<Vec<Hero>>;
    fn list_types(&self) -> AppResult<Vec<HeroType>>;

    /// Every hero type with its heroes attached, both ordered by id
    fn list_types_with_heroes(&self) -> AppResult<Vec<HeroType>>;

    fn insert_hero(
        &self,
        conn: &Connection,
        type_id: i64,
        name: &str,
        image_id: Option<i64>,
    ) -> AppResult<i64>;
    fn update_hero(&self, conn: &Connection, id: i64, changes: &HeroChanges) -> AppResult<()>;
    fn delete_hero(&self, conn: &Connection, id: i64) -> AppResult<()>;

    fn insert_type(&self, conn: &Connection, name: &str) -> AppResult<i64>;
    fn update_type(&self, conn: &Connection, id: i64, name: &str) -> AppResult<()>;
    fn delete_type(&self, conn: &Connection, id: i64) -> AppResult<()>;
}

const HERO_SELECT: &str = "SELECT h.id, h.type_id, h.name, i.id AS image_id, i.url AS image_url
     FROM hero h
     LEFT JOIN image i ON i.id = h.image_id";

pub struct SqliteHeroRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteHeroRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_hero(row: &Row) -> Result<Hero, rusqlite::Error> {
        let image_id: Option<i64> = row.get("image_id")?;
        let image_url: Option<String> = row.get("image_url")?;

        Ok(Hero {
            id: row.get("id")?,
            type_id: row.get("type_id")?,
            name: row.get("name")?,
            image: image_id.zip(image_url).map(|(id, url)| Image::new(id, url)),
        })
    }

    fn row_to_type(row: &Row) -> Result<HeroType, rusqlite::Error> {
        Ok(HeroType::new(row.get("id")?, row.get("name")?))
    }
}

/// Fail with `NotFound` when an UPDATE/DELETE matched nothing
fn require_row(rows_affected: usize) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

impl HeroRepository for SqliteHeroRepository {
    fn list_by_type(&self, type_id: i64) -> AppResult<Vec<Hero>> {
        let conn = self.pool.get()?;

        let sql = format!("{} WHERE h.type_id = ?1 ORDER BY h.id", HERO_SELECT);
        let mut stmt = conn.prepare(&sql)?;

        let heroes: Vec<Hero> = stmt
            .query_map(params![type_id], Self::row_to_hero)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(heroes)
    }

    fn list_types(&self) -> AppResult<Vec<HeroType>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM hero_type ORDER BY id")?;

        let types: Vec<HeroType> = stmt
            .query_map([], Self::row_to_type)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(types)
    }

    fn list_types_with_heroes(&self) -> AppResult<Vec<HeroType>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM hero_type ORDER BY id")?;
        let mut types: Vec<HeroType> = stmt
            .query_map([], Self::row_to_type)?
            .collect::<Result<Vec<_>, _>>()?;

        let sql = format!("{} ORDER BY h.id", HERO_SELECT);
        let mut stmt = conn.prepare(&sql)?;
        let heroes: Vec<Hero> = stmt
            .query_map([], Self::row_to_hero)?
            .collect::<Result<Vec<_>, _>>()?;

        for hero in heroes {
            if let Some(hero_type) = types.iter_mut().find(|t| t.id == hero.type_id) {
                hero_type.heroes.push(hero);
            }
        }

        Ok(types)
    }

    fn insert_hero(
        &self,
        conn: &Connection,
        type_id: i64,
        name: &str,
        image_id: Option<i64>,
    ) -> AppResult<i64> {
        conn.execute(
            "INSERT INTO hero (type_id, name, image_id, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![type_id, name, image_id, Utc::now().to_rfc3339()],
        )
        .map_err(missing_reference)?;

        Ok(conn.last_insert_rowid())
    }

    fn update_hero(&self, conn: &Connection, id: i64, changes: &HeroChanges) -> AppResult<()> {
        let rows_affected = conn.execute(
            "UPDATE hero SET
                name = COALESCE(?2, name),
                type_id = COALESCE(?3, type_id),
                image_id = COALESCE(?4, image_id)
             WHERE id = ?1",
            params![id, changes.name, changes.type_id, changes.image_id],
        )
        .map_err(missing_reference)?;

        require_row(rows_affected)
    }

    fn delete_hero(&self, conn: &Connection, id: i64) -> AppResult<()> {
        let rows_affected = conn.execute("DELETE FROM hero WHERE id = ?1", params![id])?;
        require_row(rows_affected)
    }

    fn insert_type(&self, conn: &Connection, name: &str) -> AppResult<i64> {
        conn.execute(
            "INSERT INTO hero_type (name, created_at) VALUES (?1, ?2)",
            params![name, Utc::now().to_rfc3339()],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update_type(&self, conn: &Connection, id: i64, name: &str) -> AppResult<()> {
        let rows_affected = conn.execute(
            "UPDATE hero_type SET name = ?2 WHERE id = ?1",
            params![id, name],
        )?;

        require_row(rows_affected)
    }

    fn delete_type(&self, conn: &Connection, id: i64) -> AppResult<()> {
        let rows_affected = conn.execute("DELETE FROM hero_type WHERE id = ?1", params![id])?;
        require_row(rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[test]
    fn test_types_with_heroes_are_grouped_in_order() {
        let (_dir, pool) = test_pool();
        let repo = SqliteHeroRepository::new(pool.clone());
        let conn = pool.get().unwrap();

        let tank = repo.insert_type(&conn, "Tank").unwrap();
        let mage = repo.insert_type(&conn, "Mage").unwrap();
        repo.insert_hero(&conn, mage, "Daji", None).unwrap();
        repo.insert_hero(&conn, tank, "Lian Po", None).unwrap();
        repo.insert_hero(&conn, mage, "Angela", None).unwrap();

        let types = repo.list_types_with_heroes().unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].name, "Tank");
        assert_eq!(types[0].heroes.len(), 1);
        let mage_names: Vec<&str> = types[1].heroes.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(mage_names, vec!["Daji", "Angela"]);
    }

    #[test]
    fn test_update_hero_keeps_unset_columns() {
        let (_dir, pool) = test_pool();
        let repo = SqliteHeroRepository::new(pool.clone());
        let conn = pool.get().unwrap();

        let tank = repo.insert_type(&conn, "Tank").unwrap();
        let id = repo.insert_hero(&conn, tank, "Lian Po", None).unwrap();
        let changes = HeroChanges {
            name: Some("Lian Po II".to_string()),
            ..HeroChanges::default()
        };
        repo.update_hero(&conn, id, &changes).unwrap();

        let heroes = repo.list_by_type(tank).unwrap();
        assert_eq!(heroes[0].name, "Lian Po II");
        assert_eq!(heroes[0].type_id, tank);
    }

    #[test]
    fn test_delete_type_with_heroes_is_refused() {
        let (_dir, pool) = test_pool();
        let repo = SqliteHeroRepository::new(pool.clone());
        let conn = pool.get().unwrap();

        let tank = repo.insert_type(&conn, "Tank").unwrap();
        repo.insert_hero(&conn, tank, "Lian Po", None).unwrap();

        assert!(matches!(repo.delete_type(&conn, tank), Err(AppError::Database(_))));
        assert!(matches!(repo.delete_hero(&conn, 999), Err(AppError::NotFound)));
    }

    #[test]
    fn test_insert_with_missing_type_is_not_found() {
        let (_dir, pool) = test_pool();
        let repo = SqliteHeroRepository::new(pool.clone());
        let conn = pool.get().unwrap();

        assert!(matches!(
            repo.insert_hero(&conn, 42, "Daji", None),
            Err(AppError::NotFound)
        ));
    }
}
