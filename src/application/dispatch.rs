// src/application/dispatch.rs
//
// Discriminator registry
//
// RULES:
// - Each endpoint owns a closed enum of accepted discriminator values
// - A value is resolved exactly once, before any module is called
// - The only "unknown value" branch lives in `resolve_tag`

use std::str::FromStr;

use strum::{AsRefStr, EnumIter, EnumString};

use crate::condition::Condition;
use crate::error::{ErrorMessage, ModuleResult};
use crate::modules::ElementOperation;

/// Endpoints reachable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    GetElementList,
    GetHeroList,
    GetHeroTypeList,
    HeroTypeOperate,
    HeroOperate,
    ElementOperate,
    ElementManage,
    ThemeOperate,
    GetThemeList,
    UploadImage,
    ParseVideoUrl,
}

/// `by` values of `get_element_list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ElementListBy {
    Type,
    Hot,
    Hero,
    Recommend,
    All,
    Detail,
}

/// `by` values of `get_hero_list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum HeroListBy {
    TypeId,
    TypeHero,
}

/// `by` values of `get_theme_list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ThemeListBy {
    Enabled,
}

/// `by` values of `element_operate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ElementCounterBy {
    AddPlayNum,
    AddRaiseNum,
}

impl From<ElementCounterBy> for ElementOperation {
    fn from(by: ElementCounterBy) -> Self {
        match by {
            ElementCounterBy::AddPlayNum => ElementOperation::AddPlayNum,
            ElementCounterBy::AddRaiseNum => ElementOperation::AddRaiseNum,
        }
    }
}

/// `operate` values of `element_manage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ElementManageOperate {
    Add,
    Delete,
}

impl From<ElementManageOperate> for ElementOperation {
    fn from(operate: ElementManageOperate) -> Self {
        match operate {
            ElementManageOperate::Add => ElementOperation::Add,
            ElementManageOperate::Delete => ElementOperation::Delete,
        }
    }
}

/// Resolve a discriminator value; anything not in `V` is request 2003
pub fn resolve_tag<V: FromStr>(endpoint: &str, tag: &str) -> ModuleResult<V> {
    V::from_str(tag).map_err(|_| {
        log::warn!("{}: unrecognized discriminator {:?}", endpoint, tag);
        ErrorMessage::unrecognized_request()
    })
}

/// Resolve the condition's `by` value
pub fn resolve_by<V: FromStr>(endpoint: &str, condition: &Condition) -> ModuleResult<V> {
    resolve_tag(endpoint, condition.by())
}
