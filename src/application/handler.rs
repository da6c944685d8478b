// src/application/handler.rs
//
// API Handler - the outward surface of the catalog
//
// ARCHITECTURE:
// - Resolve the discriminator once, forward to exactly one module call
// - Module errors pass through unchanged
// - Successful results are projected to DTOs, then wrapped in the envelope

use std::sync::Arc;

use crate::application::dispatch::{
    resolve_by, resolve_tag, ElementCounterBy, ElementListBy, ElementManageOperate, HeroListBy,
    ThemeListBy,
};
use crate::application::dto::{
    ElementListDto, HeroListDto, HeroTypeDto, ImageDto, ThemeDto, VideoDto,
};
use crate::application::response::{api_response, ApiResponse};
use crate::application::state::AppState;
use crate::condition::Condition;
use crate::error::ModuleResult;
use crate::modules::{
    ElementOperation, ElementQuery, HeroOperation, HeroQuery, HeroTypeOperation, ImageUpload,
    ThemeOperation, ThemeQuery, WriteOutcome,
};

/// Largest `hot` listing a caller may ask for
pub const MAX_HOT_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct ApiHandler {
    state: Arc<AppState>,
}

impl ApiHandler {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn get_element_list(&self, condition: &Condition) -> ApiResponse {
        api_response(self.element_list(condition))
    }

    pub fn get_hero_list(&self, condition: &Condition) -> ApiResponse {
        api_response(self.hero_list(condition))
    }

    /// Takes no discriminator; the condition is accepted for symmetry
    pub fn get_hero_type_list(&self, _condition: &Condition) -> ApiResponse {
        api_response(self.state.hero_module.get_all_hero_type().map(|types| {
            types.iter().map(HeroTypeDto::project).collect::<Vec<_>>()
        }))
    }

    pub fn hero_type_operate(&self, condition: &Condition, operate: &str) -> ApiResponse {
        api_response(
            resolve_tag::<HeroTypeOperation>("hero_type_operate", operate)
                .and_then(|op| self.state.hero_module.hero_type_operate(condition, op)),
        )
    }

    pub fn hero_operate(&self, condition: &Condition, operate: &str) -> ApiResponse {
        api_response(
            resolve_tag::<HeroOperation>("hero_operate", operate)
                .and_then(|op| self.state.hero_module.hero_operate(condition, op)),
        )
    }

    /// Counter updates, selected by `by`
    pub fn element_operate(&self, condition: &Condition) -> ApiResponse {
        api_response(
            resolve_by::<ElementCounterBy>("element_operate", condition)
                .and_then(|by| self.element_write(condition, by.into())),
        )
    }

    /// Element creation and removal, selected by `operate`
    pub fn element_manage(&self, condition: &Condition, operate: &str) -> ApiResponse {
        api_response(
            resolve_tag::<ElementManageOperate>("element_manage", operate)
                .and_then(|op| self.element_write(condition, op.into())),
        )
    }

    pub fn theme_operate(&self, condition: &Condition, operate: &str) -> ApiResponse {
        api_response(
            resolve_tag::<ThemeOperation>("theme_operate", operate)
                .and_then(|op| self.state.theme_module.theme_operate(condition, op)),
        )
    }

    pub fn get_theme_list(&self, condition: &Condition) -> ApiResponse {
        api_response(self.theme_list(condition))
    }

    pub fn upload_image(&self, upload: ImageUpload) -> ApiResponse {
        api_response(
            self.state
                .common_module
                .upload_image(upload)
                .map(|image| ImageDto::project(&image, &self.state.urls)),
        )
    }

    pub fn parse_video_url(&self, from_url: &str) -> ApiResponse {
        api_response(
            self.state
                .common_module
                .parse_video_url(from_url)
                .map(VideoDto::from),
        )
    }

    fn element_list(&self, condition: &Condition) -> ModuleResult<ElementListDto> {
        let by = resolve_by::<ElementListBy>("get_element_list", condition)?;

        let query = match by {
            ElementListBy::Type => ElementQuery::Type {
                type_id: condition.get_i64("type_id").unwrap_or(0),
            },
            ElementListBy::Hot => ElementQuery::Hot {
                limit: self.hot_limit(condition),
            },
            ElementListBy::Hero => ElementQuery::Hero {
                hero_id: condition.get_i64("hero_id").unwrap_or(0),
            },
            ElementListBy::Recommend => ElementQuery::Recommend,
            ElementListBy::All => ElementQuery::All,
            ElementListBy::Detail => ElementQuery::Detail {
                unique_id: condition.get_str("unique_id").to_string(),
            },
        };
        log::debug!("get_element_list by={} -> {:?}", by.as_ref(), query);

        let set = self.state.element_module.get_elements(query)?;
        Ok(ElementListDto::project(&set, &self.state.urls))
    }

    fn hero_list(&self, condition: &Condition) -> ModuleResult<HeroListDto> {
        let query = match resolve_by::<HeroListBy>("get_hero_list", condition)? {
            HeroListBy::TypeId => HeroQuery::TypeId {
                type_id: condition.get_i64("type_id").unwrap_or(0),
            },
            HeroListBy::TypeHero => HeroQuery::TypeHero,
        };

        let set = self.state.hero_module.get_hero_list(query)?;
        Ok(HeroListDto::project(&set, &self.state.urls))
    }

    fn theme_list(&self, condition: &Condition) -> ModuleResult<Vec<ThemeDto>> {
        let query = match resolve_by::<ThemeListBy>("get_theme_list", condition)? {
            ThemeListBy::Enabled => ThemeQuery::Enabled,
        };

        let themes = self.state.theme_module.get_theme_list(query)?;
        Ok(themes
            .iter()
            .map(|t| ThemeDto::project(t, &self.state.urls))
            .collect())
    }

    fn element_write(
        &self,
        condition: &Condition,
        operation: ElementOperation,
    ) -> ModuleResult<WriteOutcome> {
        self.state
            .element_module
            .element_operate(condition, operation)
    }

    /// Requested `limit`, else the configured default; capped at `MAX_HOT_LIMIT`
    fn hot_limit(&self, condition: &Condition) -> u32 {
        condition
            .get_u32("limit")
            .filter(|limit| *limit > 0)
            .unwrap_or(self.state.hot_limit)
            .min(MAX_HOT_LIMIT)
    }
}
