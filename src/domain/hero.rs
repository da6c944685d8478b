//! Heroes and hero types.
//!
//! 1. A hero belongs to exactly one hero type
//! 2. A hero type owns an ordered list of heroes
//! 3. A hero type cannot be removed while it still owns heroes
//! 4. Names cannot be empty

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, Image};

/// A playable character clips are tagged with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,
    pub type_id: i64,
    pub name: String,
    pub image: Option<Image>,
}

impl Hero {
    /// Image path, or the empty string when the hero has no image
    pub fn image_src(&self) -> &str {
        self.image.as_ref().map(|i| i.url.as_str()).unwrap_or("")
    }
}

/// A grouping of heroes (tank, mage, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroType {
    pub id: i64,
    pub name: String,
    pub heroes: Vec<Hero>,
}

impl HeroType {
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            heroes: Vec::new(),
        }
    }
}

/// Validates a hero or hero type name
pub fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
