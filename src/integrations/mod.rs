// src/integrations/mod.rs
//
// External Integrations Module

pub mod video;

pub use video::{DirectVideoResolver, ResolvedVideo, VideoResolver};

#[cfg(test)]
pub use video::MockVideoResolver;
