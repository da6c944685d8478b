pub mod entity;
pub mod invariants;

pub use entity::{Element, ElementCounter, NewElement};
pub use invariants::validate_element;
