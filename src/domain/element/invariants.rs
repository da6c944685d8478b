use super::entity::NewElement;
use crate::domain::{DomainError, DomainResult};

/// Validates the invariants a new element must satisfy before insertion
pub fn validate_element(element: &NewElement) -> DomainResult<()> {
    if element.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Element title cannot be empty".to_string(),
        ));
    }
    if element.url.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Element url cannot be empty".to_string(),
        ));
    }
    if element.unique_id.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Element unique_id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for Element:
///
/// 1. unique_id is generated once and never changes
/// 2. play_num / raise_num start at 0 and only grow
/// 3. Counters change only through the increment operations
/// 4. Title and url cannot be empty
/// 5. An element may exist without a hero or an image
