// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic, NO validation
// - Reads take a pooled connection; writes run on the caller's transaction
// - Explicit SQL only

pub mod element_repository;
pub mod hero_repository;
pub mod image_repository;
pub mod theme_repository;

pub use element_repository::{ElementRepository, SqliteElementRepository};
pub use hero_repository::{HeroChanges, HeroRepository, SqliteHeroRepository};
pub use image_repository::{ImageRepository, SqliteImageRepository};
pub use theme_repository::{SqliteThemeRepository, ThemeRepository};

use crate::error::AppError;

/// A write that names a row which does not exist is a NotFound, not a
/// database failure. Only for inserts and updates: a delete refused by a
/// RESTRICT key stays a Database error.
pub(crate) fn missing_reference(err: rusqlite::Error) -> AppError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY {
            log::debug!("write references a missing row: {}", err);
            return AppError::NotFound;
        }
    }
    AppError::Database(err)
}
