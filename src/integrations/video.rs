// src/integrations/video.rs
//
// Video URL resolution
//
// Third-party page resolution lives behind `VideoResolver`; the
// built-in resolver only accepts direct media links.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A playable video address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVideo {
    pub url: String,
    /// Which resolver produced the address
    pub source: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait VideoResolver: Send + Sync {
    /// `Ok(None)` when the URL is not one this resolver understands
    fn resolve(&self, from_url: &str) -> AppResult<Option<ResolvedVideo>>;
}

/// Accepts http(s) links pointing straight at a media file
#[derive(Debug, Clone)]
pub struct DirectVideoResolver {
    pattern: Regex,
}

impl DirectVideoResolver {
    pub fn new() -> AppResult<Self> {
        let pattern = Regex::new(
            r"(?i)^https?://[^\s/?#]+(?:/[^\s?#]*)?\.(?:mp4|m3u8|flv|webm)(?:[?#]\S*)?$",
        )
        .map_err(|e| AppError::Other(format!("Invalid video pattern: {}", e)))?;

        Ok(Self { pattern })
    }
}

impl VideoResolver for DirectVideoResolver {
    fn resolve(&self, from_url: &str) -> AppResult<Option<ResolvedVideo>> {
        let from_url = from_url.trim();
        if !self.pattern.is_match(from_url) {
            return Ok(None);
        }

        Ok(Some(ResolvedVideo {
            url: from_url.to_string(),
            source: "direct".to_string(),
        }))
    }
}
