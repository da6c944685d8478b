// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are client-facing representations
// - Projection is total: absent relations become "" or 0, never null
// - Collections map element-wise and keep their order
// - Conversion FROM domain entities only (never TO)

use serde::Serialize;

use crate::domain::{Element, Hero, HeroType, Image, Theme};
use crate::helper::{format_duration_time, MediaUrls};
use crate::integrations::ResolvedVideo;
use crate::modules::{ElementSet, HeroSet};

// ============================================================================
// ELEMENT DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementDto {
    pub unique_id: String,
    pub hero_id: i64,
    pub url: String,
    pub title: String,
    /// Full poster URL, `""` without a poster
    pub poster: String,
    pub play_num: u64,
    pub raise_num: u64,
    /// Display form, `MM:SS` or `H:MM:SS`
    pub duration: String,
}

impl ElementDto {
    pub fn project(element: &Element, urls: &MediaUrls) -> Self {
        Self {
            unique_id: element.unique_id.clone(),
            hero_id: element.hero_id.unwrap_or(0),
            url: element.url.clone(),
            title: element.title.clone(),
            poster: urls.full_url(element.image_src()),
            play_num: element.play_num,
            raise_num: element.raise_num,
            duration: format_duration_time(element.duration),
        }
    }

    pub fn project_all(elements: &[Element], urls: &MediaUrls) -> Vec<Self> {
        elements.iter().map(|e| Self::project(e, urls)).collect()
    }
}

/// Payload of `get_element_list`: a list, or a single (possibly absent) element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ElementListDto {
    Many(Vec<ElementDto>),
    One(Option<ElementDto>),
}

impl ElementListDto {
    pub fn project(set: &ElementSet, urls: &MediaUrls) -> Self {
        match set {
            ElementSet::Many(elements) => Self::Many(ElementDto::project_all(elements, urls)),
            ElementSet::One(element) => {
                Self::One(element.as_ref().map(|e| ElementDto::project(e, urls)))
            }
        }
    }
}

// ============================================================================
// HERO DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroDto {
    pub hero_id: i64,
    pub hero_name: String,
    pub image_url: String,
}

impl HeroDto {
    pub fn project(hero: &Hero, urls: &MediaUrls) -> Self {
        Self {
            hero_id: hero.id,
            hero_name: hero.name.clone(),
            image_url: urls.full_url(hero.image_src()),
        }
    }
}

/// A hero type together with its heroes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroTypeHeroDto {
    pub name: String,
    pub hero: Vec<HeroDto>,
}

impl HeroTypeHeroDto {
    pub fn project(hero_type: &HeroType, urls: &MediaUrls) -> Self {
        Self {
            name: hero_type.name.clone(),
            hero: hero_type
                .heroes
                .iter()
                .map(|h| HeroDto::project(h, urls))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroTypeDto {
    pub type_id: i64,
    pub name: String,
}

impl HeroTypeDto {
    pub fn project(hero_type: &HeroType) -> Self {
        Self {
            type_id: hero_type.id,
            name: hero_type.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeroListDto {
    Heroes(Vec<HeroDto>),
    Types(Vec<HeroTypeHeroDto>),
}

impl HeroListDto {
    pub fn project(set: &HeroSet, urls: &MediaUrls) -> Self {
        match set {
            HeroSet::Heroes(heroes) => {
                Self::Heroes(heroes.iter().map(|h| HeroDto::project(h, urls)).collect())
            }
            HeroSet::Types(types) => Self::Types(
                types
                    .iter()
                    .map(|t| HeroTypeHeroDto::project(t, urls))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// THEME DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDto {
    pub theme_id: i64,
    pub name: String,
    pub theme_image_url: String,
    pub elements: Vec<ElementDto>,
}

impl ThemeDto {
    pub fn project(theme: &Theme, urls: &MediaUrls) -> Self {
        Self {
            theme_id: theme.id,
            name: theme.name.clone(),
            theme_image_url: urls.full_url(theme.image_src()),
            elements: ElementDto::project_all(&theme.elements, urls),
        }
    }
}

// ============================================================================
// COMMON DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDto {
    pub image_id: i64,
    pub url: String,
}

impl ImageDto {
    pub fn project(image: &Image, urls: &MediaUrls) -> Self {
        Self {
            image_id: image.id,
            url: urls.full_url(&image.url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoDto {
    pub url: String,
    pub source: String,
}

impl From<ResolvedVideo> for VideoDto {
    fn from(video: ResolvedVideo) -> Self {
        Self {
            url: video.url,
            source: video.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn urls() -> MediaUrls {
        MediaUrls::new("https://cdn.example.com")
    }

    fn element(image: Option<Image>, hero_id: Option<i64>) -> Element {
        Element {
            id: 1,
            unique_id: "abc".to_string(),
            hero_id,
            url: "https://v.example.com/a.mp4".to_string(),
            title: "Triple kill".to_string(),
            image,
            play_num: 7,
            raise_num: 2,
            duration: 125,
            is_recommend: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_element_without_image_or_hero_projects_defaults() {
        let dto = ElementDto::project(&element(None, None), &urls());
        assert_eq!(dto.poster, "");
        assert_eq!(dto.hero_id, 0);
        assert_eq!(dto.duration, "02:05");

        let json = serde_json::to_value(&dto).unwrap();
        for key in ["unique_id", "hero_id", "url", "title", "poster", "play_num", "raise_num", "duration"] {
            assert!(!json[key].is_null(), "{} is null", key);
        }
    }

    #[test]
    fn test_element_poster_is_full_url() {
        let image = Image::new(3, "uploads/20240101/p.png".to_string());
        let dto = ElementDto::project(&element(Some(image), Some(9)), &urls());
        assert_eq!(dto.poster, "https://cdn.example.com/uploads/20240101/p.png");
        assert_eq!(dto.hero_id, 9);
    }

    #[test]
    fn test_hero_type_projection_keeps_order() {
        let mut hero_type = HeroType::new(1, "Mage".to_string());
        hero_type.heroes = vec![
            Hero { id: 4, type_id: 1, name: "Daji".to_string(), image: None },
            Hero {
                id: 2,
                type_id: 1,
                name: "Angela".to_string(),
                image: Some(Image::new(1, "http://img.example.com/a.png".to_string())),
            },
        ];

        let dto = HeroTypeHeroDto::project(&hero_type, &urls());
        assert_eq!(dto.name, "Mage");
        assert_eq!(dto.hero[0].hero_name, "Daji");
        assert_eq!(dto.hero[0].image_url, "");
        assert_eq!(dto.hero[1].image_url, "http://img.example.com/a.png");
        assert_eq!(HeroTypeDto::project(&hero_type), HeroTypeDto { type_id: 1, name: "Mage".to_string() });
    }

    #[test]
    fn test_detail_miss_serializes_as_null() {
        let dto = ElementListDto::project(&ElementSet::One(None), &urls());
        assert!(serde_json::to_value(dto).unwrap().is_null());

        let dto = ElementListDto::project(&ElementSet::Many(Vec::new()), &urls());
        assert_eq!(serde_json::to_value(dto).unwrap(), serde_json::json!([]));
    }

    #[test]
    fn test_theme_projection() {
        let theme = Theme {
            id: 5,
            name: "Weekly".to_string(),
            image: None,
            enabled: true,
            sort: 0,
            elements: vec![element(None, None)],
        };
        let dto = ThemeDto::project(&theme, &urls());
        assert_eq!(dto.theme_image_url, "");
        assert_eq!(dto.elements.len(), 1);
        assert_eq!(dto.elements[0].unique_id, "abc");
    }
}
