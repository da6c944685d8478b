use serde::{Deserialize, Serialize};

use crate::domain::{Element, Image};

/// A curated, browsable group of elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: i64,
    pub name: String,
    pub image: Option<Image>,
    pub enabled: bool,

    /// Listing order, ascending
    pub sort: i64,

    /// Elements in theme order
    pub elements: Vec<Element>,
}

impl Theme {
    pub fn image_src(&self) -> &str {
        self.image.as_ref().map(|i| i.url.as_str()).unwrap_or("")
    }
}
