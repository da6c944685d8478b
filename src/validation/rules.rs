// src/validation/rules.rs
//
// Rulesets for every validated write.
//
// Required text fields default to "" so a missing key surfaces as a
// field error rather than a decode failure. Form-encoded callers send
// numbers and flags as strings; ids and counts accept `"7"` as well as
// `7`, and flags accept `true`, `1` and `"1"`.

use std::collections::HashSet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_with::{serde_as, DeserializeAs, DisplayFromStr, PickFirst};
use validator::{Validate, ValidationError};

use super::Ruleset;

/// A number sent either as JSON or as its decimal text
type Lenient = PickFirst<(serde_with::Same, DisplayFromStr)>;

/// Boolean flag in JSON, numeric (`0`/`1`) or text form
pub struct Flag;

impl<'de> DeserializeAs<'de, bool> for Flag {
    fn deserialize_as<D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Bool(flag) => Ok(flag),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(D::Error::custom(format!("invalid flag {}", n))),
            },
            Value::String(s) => match s.trim() {
                "1" | "true" => Ok(true),
                "0" | "false" | "" => Ok(false),
                other => Err(D::Error::custom(format!("invalid flag {:?}", other))),
            },
            Value::Null => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag {}", other))),
        }
    }
}

fn unique_element_ids(ids: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(ids.len());
    if ids.iter().all(|id| seen.insert(id.as_str())) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate").with_message("element_ids must be unique".into()))
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddElement {
    #[serde_as(as = "Option<Lenient>")]
    pub hero_id: Option<i64>,

    #[serde(default)]
    #[validate(url)]
    pub url: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    /// Existing uploaded image to use as poster
    #[serde_as(as = "Option<Lenient>")]
    pub image_id: Option<i64>,

    /// Remote poster URL; stored as a new image row
    #[validate(url)]
    pub image_url: Option<String>,

    /// Seconds
    #[serde(default)]
    #[serde_as(as = "Lenient")]
    #[validate(range(max = 86400))]
    pub duration: u32,

    #[serde(default)]
    #[serde_as(as = "Flag")]
    pub is_recommend: bool,
}

impl Ruleset for AddElement {
    const NAME: &'static str = "add_element";
}

#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddHero {
    #[serde(default)]
    #[serde_as(as = "Lenient")]
    #[validate(range(min = 1))]
    pub type_id: i64,

    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    #[serde_as(as = "Option<Lenient>")]
    pub image_id: Option<i64>,
}

impl Ruleset for AddHero {
    const NAME: &'static str = "add_hero";
}

#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHero {
    #[serde(default)]
    #[serde_as(as = "Lenient")]
    #[validate(range(min = 1))]
    pub hero_id: i64,

    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,

    #[serde_as(as = "Option<Lenient>")]
    #[validate(range(min = 1))]
    pub type_id: Option<i64>,

    #[serde_as(as = "Option<Lenient>")]
    pub image_id: Option<i64>,
}

impl Ruleset for UpdateHero {
    const NAME: &'static str = "update_hero";
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddHeroType {
    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

impl Ruleset for AddHeroType {
    const NAME: &'static str = "add_hero_type";
}

#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHeroType {
    #[serde(default)]
    #[serde_as(as = "Lenient")]
    #[validate(range(min = 1))]
    pub type_id: i64,

    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

impl Ruleset for UpdateHeroType {
    const NAME: &'static str = "update_hero_type";
}

#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddTheme {
    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    #[serde_as(as = "Option<Lenient>")]
    pub image_id: Option<i64>,

    #[serde(default)]
    #[serde_as(as = "Lenient")]
    pub sort: i64,

    /// Element `unique_id`s in display order, each at most once
    #[serde(default)]
    #[validate(length(max = 200), custom(function = "unique_element_ids"))]
    pub element_ids: Vec<String>,
}

impl Ruleset for AddTheme {
    const NAME: &'static str = "add_theme";
}
