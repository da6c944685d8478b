// src/config.rs
//
// Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use crate::db::default_database_path;
use crate::error::{AppError, AppResult};

/// Catalog configuration
///
/// | Env Var                   | Default                              |
/// |---------------------------|--------------------------------------|
/// | `GLORYKING_DATABASE_PATH` | `{data_dir}/gloryking/gloryking.db`  |
/// | `GLORYKING_BASE_URL`      | `http://localhost`                   |
/// | `GLORYKING_UPLOAD_DIR`    | `{data_dir}/gloryking/uploads`       |
/// | `GLORYKING_HOT_LIMIT`     | `20`                                 |
/// | `GLORYKING_POOL_SIZE`     | `15`                                 |
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    /// Prefix turning stored image paths into fully qualified URLs
    pub base_url: String,
    pub upload_dir: PathBuf,
    /// Default size of the `hot` element listing
    pub hot_limit: u32,
    pub pool_size: u32,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, map in tests)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup("GLORYKING_DATABASE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let upload_dir = match lookup("GLORYKING_UPLOAD_DIR") {
            Some(path) => PathBuf::from(path),
            None => database_path
                .parent()
                .map(|dir| dir.join("uploads"))
                .unwrap_or_else(|| PathBuf::from("uploads")),
        };

        let base_url = lookup("GLORYKING_BASE_URL").unwrap_or_else(|| "http://localhost".into());

        let hot_limit = parse_number(&lookup, "GLORYKING_HOT_LIMIT", 20)?;
        let pool_size = parse_number(&lookup, "GLORYKING_POOL_SIZE", 15)?;

        if hot_limit == 0 || pool_size == 0 {
            return Err(AppError::Config(
                "GLORYKING_HOT_LIMIT and GLORYKING_POOL_SIZE must be positive".to_string(),
            ));
        }

        Ok(Self {
            database_path,
            base_url,
            upload_dir,
            hot_limit,
            pool_size,
        })
    }
}

fn parse_number<F>(lookup: &F, key: &str, default: u32) -> AppResult<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a positive integer, got {:?}", key, raw))),
        None => Ok(default),
    }
}
