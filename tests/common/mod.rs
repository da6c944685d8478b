// tests/common/mod.rs
//
// Shared setup for end-to-end handler tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use gloryking::db::{create_connection_pool, initialize_database};
use gloryking::{ApiHandler, ApiResponse, AppConfig, AppState, Condition, ConnectionPool};
use serde_json::Value;
use tempfile::TempDir;

pub const BASE_URL: &str = "https://cdn.example.com";

pub struct TestApp {
    pub handler: ApiHandler,
    pub pool: Arc<ConnectionPool>,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = AppConfig {
            database_path: dir.path().join("catalog.db"),
            base_url: BASE_URL.to_string(),
            upload_dir: dir.path().join("uploads"),
            hot_limit: 20,
            pool_size: 4,
        };

        let pool = Arc::new(create_connection_pool(&config.database_path, config.pool_size)?);
        {
            let conn = pool.get()?;
            initialize_database(&conn)?;
        }

        let state = AppState::new(pool.clone(), &config)?;
        Ok(Self {
            handler: ApiHandler::new(Arc::new(state)),
            pool,
            upload_dir: config.upload_dir,
            _dir: dir,
        })
    }

    pub fn count(&self, table: &str) -> anyhow::Result<i64> {
        let conn = self.pool.get()?;
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// Create a hero type and return its id
    pub fn hero_type(&self, name: &str) -> i64 {
        let response = self
            .handler
            .hero_type_operate(&Condition::new().with("name", name), "add");
        created_id(&response)
    }

    /// Create a hero and return its id
    pub fn hero(&self, type_id: i64, name: &str) -> i64 {
        let condition = Condition::new().with("type_id", type_id).with("name", name);
        created_id(&self.handler.hero_operate(&condition, "add"))
    }

    /// Create an element and return its unique id
    pub fn element(&self, condition: Condition) -> String {
        let response = self.handler.element_manage(&condition, "add");
        assert_eq!(response.code, 0, "add failed: {:?}", response);
        response.data["element_created"]["unique_id"]
            .as_str()
            .expect("unique_id")
            .to_string()
    }
}

pub fn created_id(response: &ApiResponse) -> i64 {
    assert_eq!(response.code, 0, "write failed: {:?}", response);
    response.data["created"]["id"].as_i64().expect("created id")
}

pub fn by(value: &str) -> Condition {
    Condition::new().with("by", value)
}

pub fn clip(title: &str) -> Condition {
    Condition::new()
        .with("url", format!("https://v.example.com/{}.mp4", title))
        .with("title", title)
        .with("duration", 90)
}

pub fn titles(data: &Value) -> Vec<String> {
    data.as_array()
        .expect("array payload")
        .iter()
        .map(|e| e["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
