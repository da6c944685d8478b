// src/validation/mod.rs
//
// Form validation adapter
//
// A `FormValidator` binds a named ruleset to the raw request condition.
// The condition is decoded into the ruleset struct and checked with the
// `validator` crate; failures become ErrorMessage 2001 with field errors.

pub mod rules;

pub use rules::{AddElement, AddHero, AddHeroType, AddTheme, UpdateHero, UpdateHeroType};

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use validator::{Validate, ValidationErrors};

use crate::condition::Condition;
use crate::error::message::codes;
use crate::error::{ErrorMessage, ModuleResult};

/// A named set of validation rules
pub trait Ruleset: DeserializeOwned + Validate {
    const NAME: &'static str;
}

/// Outcome of validating one condition against one ruleset
#[derive(Debug)]
pub struct FormValidator<R: Ruleset> {
    outcome: ModuleResult<R>,
}

impl<R: Ruleset> FormValidator<R> {
    pub fn new(condition: &Condition) -> Self {
        let outcome = match serde_json::from_value::<R>(condition.to_value()) {
            Ok(form) => match form.validate() {
                Ok(()) => Ok(form),
                Err(errors) => Err(field_errors(R::NAME, &errors)),
            },
            Err(e) => Err(ErrorMessage::with_details(
                codes::VALIDATION_FAILED,
                json!({
                    "ruleset": R::NAME,
                    "fields": { "_form": [{ "code": "malformed", "message": e.to_string() }] },
                }),
            )),
        };

        if let Err(error) = &outcome {
            log::debug!("{} rejected: {:?}", R::NAME, error.details());
        }

        Self { outcome }
    }

    /// The validated form, or the structured validation error
    pub fn into_result(self) -> ModuleResult<R> {
        self.outcome
    }
}

fn field_errors(ruleset: &str, errors: &ValidationErrors) -> ErrorMessage {
    let fields = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<Value> = errors
                .iter()
                .map(|err| {
                    json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), Value::Array(messages))
        })
        .collect::<Map<_, _>>();

    ErrorMessage::with_details(
        codes::VALIDATION_FAILED,
        json!({ "ruleset": ruleset, "fields": fields }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_passes() {
        let condition = Condition::new()
            .with("url", "https://cdn.example.com/clip.mp4")
            .with("title", "Pentakill")
            .with("duration", 90);
        let form = FormValidator::<AddElement>::new(&condition)
            .into_result()
            .unwrap();
        assert_eq!(form.title, "Pentakill");
        assert_eq!(form.duration, 90);
        assert!(!form.is_recommend);
    }

    #[test]
    fn test_invalid_form_reports_fields() {
        let condition = Condition::new().with("url", "not a url");
        let error = FormValidator::<AddElement>::new(&condition)
            .into_result()
            .unwrap_err();

        assert_eq!(error.code(), codes::VALIDATION_FAILED);
        let fields = &error.details().unwrap()["fields"];
        assert!(fields.get("url").is_some());
        assert!(fields.get("title").is_some());
        assert_eq!(error.details().unwrap()["ruleset"], "add_element");
    }

    #[test]
    fn test_wrong_types_are_malformed() {
        let condition = Condition::new().with("name", 42);
        let error = FormValidator::<AddHeroType>::new(&condition)
            .into_result()
            .unwrap_err();
        assert_eq!(error.code(), codes::VALIDATION_FAILED);
        assert!(error.details().unwrap()["fields"].get("_form").is_some());
    }

    #[test]
    fn test_numbers_and_flags_accept_text() {
        let condition = Condition::new()
            .with("url", "https://cdn.example.com/clip.mp4")
            .with("title", "Pentakill")
            .with("hero_id", "7")
            .with("image_id", "3")
            .with("duration", "90")
            .with("is_recommend", "1");
        let form = FormValidator::<AddElement>::new(&condition)
            .into_result()
            .unwrap();
        assert_eq!(form.hero_id, Some(7));
        assert_eq!(form.image_id, Some(3));
        assert_eq!(form.duration, 90);
        assert!(form.is_recommend);

        let hero = FormValidator::<AddHero>::new(
            &Condition::new().with("type_id", "2").with("name", "Daji"),
        )
        .into_result()
        .unwrap();
        assert_eq!(hero.type_id, 2);

        let update = FormValidator::<UpdateHero>::new(
            &Condition::new().with("hero_id", "5").with("type_id", "2"),
        )
        .into_result()
        .unwrap();
        assert_eq!(update.hero_id, 5);
        assert_eq!(update.type_id, Some(2));

        let theme = FormValidator::<AddTheme>::new(
            &Condition::new().with("name", "Weekly").with("sort", "4"),
        )
        .into_result()
        .unwrap();
        assert_eq!(theme.sort, 4);
    }

    #[test]
    fn test_flag_forms() {
        for (raw, expected) in [
            (json!(true), true),
            (json!(1), true),
            (json!("true"), true),
            (json!(0), false),
            (json!("0"), false),
            (json!(null), false),
        ] {
            let condition = Condition::new()
                .with("url", "https://cdn.example.com/clip.mp4")
                .with("title", "t")
                .with("is_recommend", raw.clone());
            let form = FormValidator::<AddElement>::new(&condition)
                .into_result()
                .unwrap();
            assert_eq!(form.is_recommend, expected, "{}", raw);
        }

        let condition = Condition::new()
            .with("url", "https://cdn.example.com/clip.mp4")
            .with("title", "t")
            .with("is_recommend", "maybe");
        let error = FormValidator::<AddElement>::new(&condition)
            .into_result()
            .unwrap_err();
        assert!(error.details().unwrap()["fields"].get("_form").is_some());
    }

    #[test]
    fn test_non_numeric_text_is_malformed() {
        let condition = Condition::new().with("type_id", "mage").with("name", "Daji");
        let error = FormValidator::<AddHero>::new(&condition)
            .into_result()
            .unwrap_err();
        assert_eq!(error.code(), codes::VALIDATION_FAILED);
        assert!(error.details().unwrap()["fields"].get("_form").is_some());
    }

    #[test]
    fn test_duplicate_element_ids_are_rejected() {
        let condition = Condition::new()
            .with("name", "Weekly")
            .with("element_ids", json!(["a1", "b2", "a1"]));
        let error = FormValidator::<AddTheme>::new(&condition)
            .into_result()
            .unwrap_err();
        assert_eq!(error.code(), codes::VALIDATION_FAILED);
        let fields = &error.details().unwrap()["fields"];
        assert_eq!(fields["element_ids"][0]["code"], "duplicate");
    }
}
