// src/main.rs
//
// Command-line entry point: one request per invocation.
//
//   gloryking <endpoint> [condition-json] [operate]
//
// `upload_image` reads the file named by the condition's `file_path`;
// `parse_video_url` reads `from_url`. The envelope is printed as JSON.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};

use gloryking::application::{ApiHandler, ApiResponse, AppState, Endpoint};
use gloryking::db::{create_connection_pool, initialize_database, verify_database_integrity};
use gloryking::{AppConfig, Condition, ImageUpload};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(endpoint_name) = args.next() else {
        bail!("usage: gloryking <endpoint> [condition-json] [operate]");
    };
    let raw_condition = args.next().unwrap_or_else(|| "{}".to_string());
    let operate = args.next().unwrap_or_default();

    // 1. INFRASTRUCTURE
    let config = AppConfig::from_env()?;
    let pool = Arc::new(create_connection_pool(&config.database_path, config.pool_size)?);
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }
    log::info!("catalog database at {}", config.database_path.display());

    // 2. APPLICATION STATE
    let state = Arc::new(AppState::new(pool, &config)?);
    let handler = ApiHandler::new(state);

    // 3. REQUEST
    let value: serde_json::Value =
        serde_json::from_str(&raw_condition).context("condition is not valid JSON")?;
    let condition = match Condition::try_from(value) {
        Ok(condition) => condition,
        Err(other) => bail!("condition must be a JSON object, got {}", other),
    };

    let response = match endpoint_name.parse::<Endpoint>() {
        Ok(endpoint) => run(&handler, endpoint, &condition, &operate)?,
        Err(_) => {
            log::warn!("unknown endpoint {:?}", endpoint_name);
            ApiResponse::error(&gloryking::ErrorMessage::unrecognized_request())
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run(
    handler: &ApiHandler,
    endpoint: Endpoint,
    condition: &Condition,
    operate: &str,
) -> anyhow::Result<ApiResponse> {
    let response = match endpoint {
        Endpoint::GetElementList => handler.get_element_list(condition),
        Endpoint::GetHeroList => handler.get_hero_list(condition),
        Endpoint::GetHeroTypeList => handler.get_hero_type_list(condition),
        Endpoint::HeroTypeOperate => handler.hero_type_operate(condition, operate),
        Endpoint::HeroOperate => handler.hero_operate(condition, operate),
        Endpoint::ElementOperate => handler.element_operate(condition),
        Endpoint::ElementManage => handler.element_manage(condition, operate),
        Endpoint::ThemeOperate => handler.theme_operate(condition, operate),
        Endpoint::GetThemeList => handler.get_theme_list(condition),
        Endpoint::UploadImage => {
            let file_path = Path::new(condition.get_str("file_path"));
            let bytes = std::fs::read(file_path)
                .with_context(|| format!("cannot read {}", file_path.display()))?;
            let file_name = file_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            handler.upload_image(ImageUpload::new(file_name, bytes))
        }
        Endpoint::ParseVideoUrl => handler.parse_video_url(condition.get_str("from_url")),
    };

    Ok(response)
}
