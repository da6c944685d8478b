// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::ConnectionPool;
use crate::error::AppResult;
use crate::helper::MediaUrls;
use crate::infrastructure::LocalImageStorage;
use crate::integrations::DirectVideoResolver;
use crate::modules::{CommonModule, ElementModule, HeroModule, ThemeModule};
use crate::repositories::{
    SqliteElementRepository, SqliteHeroRepository, SqliteImageRepository, SqliteThemeRepository,
};

/// Everything an `ApiHandler` needs.
/// All modules are Arc-wrapped for sharing across threads.
pub struct AppState {
    pub element_module: Arc<ElementModule>,
    pub hero_module: Arc<HeroModule>,
    pub theme_module: Arc<ThemeModule>,
    pub common_module: Arc<CommonModule>,
    pub urls: MediaUrls,
    /// Default `hot` listing size
    pub hot_limit: u32,
}

impl AppState {
    /// Wire SQLite repositories, local image storage and the direct video resolver
    pub fn new(pool: Arc<ConnectionPool>, config: &AppConfig) -> AppResult<Self> {
        let element_repo = Arc::new(SqliteElementRepository::new(pool.clone()));
        let hero_repo = Arc::new(SqliteHeroRepository::new(pool.clone()));
        let image_repo = Arc::new(SqliteImageRepository::new());
        let theme_repo = Arc::new(SqliteThemeRepository::new(pool.clone()));

        let storage = Arc::new(LocalImageStorage::new(&config.upload_dir));
        let resolver = Arc::new(DirectVideoResolver::new()?);

        Ok(Self {
            element_module: Arc::new(ElementModule::new(
                pool.clone(),
                element_repo,
                image_repo.clone(),
            )),
            hero_module: Arc::new(HeroModule::new(pool.clone(), hero_repo)),
            theme_module: Arc::new(ThemeModule::new(pool.clone(), theme_repo)),
            common_module: Arc::new(CommonModule::new(pool, image_repo, storage, resolver)),
            urls: MediaUrls::new(config.base_url.clone()),
            hot_limit: config.hot_limit,
        })
    }
}
