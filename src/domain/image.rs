use serde::{Deserialize, Serialize};

/// A stored image, owned by an element, hero or theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,

    /// Storage-relative path, or an absolute URL for remote posters
    pub url: String,
}

impl Image {
    pub fn new(id: i64, url: String) -> Self {
        Self { id, url }
    }
}
