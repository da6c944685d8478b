// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Implementation details that support the domain
// but are not part of the domain itself.

pub mod image_storage;

pub use image_storage::{ImageStorage, LocalImageStorage};
