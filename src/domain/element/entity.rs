use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Image;

/// A playable clip in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Internal row identifier
    pub id: i64,

    /// Stable external identifier
    pub unique_id: String,

    /// Hero this clip is tagged with, if any
    pub hero_id: Option<i64>,

    pub url: String,
    pub title: String,
    pub image: Option<Image>,

    /// Play counter, only grows through explicit increments
    pub play_num: u64,

    /// "Raise" (like) counter, only grows through explicit increments
    pub raise_num: u64,

    /// Duration in seconds
    pub duration: u32,

    pub is_recommend: bool,
    pub created_at: DateTime<Utc>,
}

/// Element fields supplied on creation
#[derive(Debug, Clone, PartialEq)]
pub struct NewElement {
    pub unique_id: String,
    pub hero_id: Option<i64>,
    pub url: String,
    pub title: String,
    pub image_id: Option<i64>,
    pub duration: u32,
    pub is_recommend: bool,
    pub created_at: DateTime<Utc>,
}

impl NewElement {
    /// Build a new element with a freshly generated external id
    pub fn new(url: String, title: String, duration: u32) -> Self {
        Self {
            unique_id: Uuid::new_v4().simple().to_string(),
            hero_id: None,
            url,
            title,
            image_id: None,
            duration,
            is_recommend: false,
            created_at: Utc::now(),
        }
    }
}

/// Which counter an increment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCounter {
    PlayNum,
    RaiseNum,
}

impl ElementCounter {
    /// Column holding the counter
    pub fn column(&self) -> &'static str {
        match self {
            ElementCounter::PlayNum => "play_num",
            ElementCounter::RaiseNum => "raise_num",
        }
    }
}

impl Element {
    pub fn image_src(&self) -> &str {
        self.image.as_ref().map(|i| i.url.as_str()).unwrap_or("")
    }
}
