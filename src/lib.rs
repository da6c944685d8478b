// src/lib.rs
// GloryKing - hero clip catalog API core
//
// Architecture:
// - Modules: one per entity family, typed queries in, ErrorMessage out
// - Application: discriminator registry, DTO projection, response envelope
// - Explicit: every write is one scoped transaction, no implicit behavior

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod condition;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod helper;
pub mod infrastructure;
pub mod integrations;
pub mod repositories;
pub mod validation;

// ============================================================================
// MODULES & APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod modules;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{Element, ElementCounter, Hero, HeroType, Image, NewElement, Theme};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult, ErrorMessage, ModuleResult};

// ============================================================================
// PUBLIC API - Database & Configuration
// ============================================================================

pub use config::AppConfig;
pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Modules
// ============================================================================

pub use condition::Condition;
pub use modules::{
    CommonModule, ElementModule, ElementOperation, ElementQuery, ElementSet, HeroModule,
    HeroOperation, HeroQuery, HeroSet, HeroTypeOperation, ImageUpload, ThemeModule,
    ThemeOperation, ThemeQuery, WriteOutcome,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{api_response, ApiHandler, ApiResponse, AppState, Endpoint};
