// src/domain/mod.rs
//
// Domain Root
//
// All other modules import entities from `crate::domain::*`

pub mod element;
pub mod hero;
pub mod image;
pub mod theme;

pub use element::{validate_element, Element, ElementCounter, NewElement};
pub use hero::{validate_name, Hero, HeroType};
pub use image::Image;
pub use theme::Theme;

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
