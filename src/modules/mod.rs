// src/modules/mod.rs
//
// Domain Modules - one per entity family
//
// CRITICAL RULES:
// - Reads take a typed query; there is no "unknown variant" inside a module
// - Validated writes check their ruleset before any connection is taken
// - Every write runs in one scoped transaction: commit, or roll back on drop
// - Expected failures leave a module as ErrorMessage values, never panics

pub mod common_module;
pub mod element_module;
pub mod hero_module;
pub mod theme_module;

pub use common_module::{CommonModule, ImageUpload};
pub use element_module::{ElementModule, ElementOperation, ElementQuery, ElementSet};
pub use hero_module::{HeroModule, HeroOperation, HeroQuery, HeroSet, HeroTypeOperation};
pub use theme_module::{ThemeModule, ThemeOperation, ThemeQuery};

use serde::Serialize;

/// Effect of a successful write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// A row was created with this id
    Created { id: i64 },
    /// An element was created with this external id
    ElementCreated { unique_id: String },
    /// A counter was incremented to `value`
    Counted { unique_id: String, value: u64 },
    Updated { id: i64 },
    Deleted,
}
