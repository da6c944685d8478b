// src/modules/element_module.rs
//
// Element Module - clip listing, creation and counters
//
// CRITICAL RULES:
// - Counters change only through AddPlayNum / AddRaiseNum
// - Counter updates are relative SQL updates, never read-modify-write here
// - A poster given by URL is stored in the same transaction as the element

use std::sync::Arc;

use crate::condition::Condition;
use crate::db::{begin_transaction, get_connection, ConnectionPool};
use crate::domain::{validate_element, Element, ElementCounter, NewElement};
use crate::error::{AppResult, ModuleResult};
use crate::modules::WriteOutcome;
use crate::repositories::{ElementRepository, ImageRepository};
use crate::validation::{AddElement, FormValidator};

/// Read strategies for elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementQuery {
    /// Elements whose hero belongs to the hero type
    Type { type_id: i64 },
    /// Most played first
    Hot { limit: u32 },
    Hero { hero_id: i64 },
    Recommend,
    All,
    Detail { unique_id: String },
}

/// Result of an element read
#[derive(Debug, Clone, PartialEq)]
pub enum ElementSet {
    Many(Vec<Element>),
    /// Single lookup; `None` is a neutral "no such element"
    One(Option<Element>),
}

/// Element writes; wire names live on the dispatch enums that convert into this
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementOperation {
    Add,
    AddPlayNum,
    AddRaiseNum,
    Delete,
}

pub struct ElementModule {
    pool: Arc<ConnectionPool>,
    element_repo: Arc<dyn ElementRepository>,
    image_repo: Arc<dyn ImageRepository>,
}

impl ElementModule {
    pub fn new(
        pool: Arc<ConnectionPool>,
        element_repo: Arc<dyn ElementRepository>,
        image_repo: Arc<dyn ImageRepository>,
    ) -> Self {
        Self {
            pool,
            element_repo,
            image_repo,
        }
    }

    pub fn get_elements(&self, query: ElementQuery) -> ModuleResult<ElementSet> {
        log::debug!("element query {:?}", query);

        let set = match query {
            ElementQuery::Type { type_id } => {
                ElementSet::Many(self.element_repo.list_by_hero_type(type_id)?)
            }
            ElementQuery::Hot { limit } => ElementSet::Many(self.element_repo.list_hot(limit)?),
            ElementQuery::Hero { hero_id } => {
                ElementSet::Many(self.element_repo.list_by_hero(hero_id)?)
            }
            ElementQuery::Recommend => ElementSet::Many(self.element_repo.list_recommended()?),
            ElementQuery::All => ElementSet::Many(self.element_repo.list_all()?),
            ElementQuery::Detail { unique_id } => {
                ElementSet::One(self.element_repo.get_by_unique_id(&unique_id)?)
            }
        };

        Ok(set)
    }

    pub fn element_operate(
        &self,
        condition: &Condition,
        operation: ElementOperation,
    ) -> ModuleResult<WriteOutcome> {
        match operation {
            ElementOperation::Add => {
                let form = FormValidator::<AddElement>::new(condition).into_result()?;
                Ok(self.add_element(form)?)
            }
            ElementOperation::AddPlayNum => {
                Ok(self.increment(condition.get_str("unique_id"), ElementCounter::PlayNum)?)
            }
            ElementOperation::AddRaiseNum => {
                Ok(self.increment(condition.get_str("unique_id"), ElementCounter::RaiseNum)?)
            }
            ElementOperation::Delete => Ok(self.delete(condition.get_str("unique_id"))?),
        }
    }

    fn add_element(&self, form: AddElement) -> AppResult<WriteOutcome> {
        let mut element = NewElement::new(form.url, form.title, form.duration);
        element.hero_id = form.hero_id;
        element.image_id = form.image_id;
        element.is_recommend = form.is_recommend;
        validate_element(&element)?;

        let mut conn = get_connection(&self.pool)?;
        let tx = begin_transaction(&mut conn)?;

        if let Some(image_url) = form.image_url.as_deref() {
            element.image_id = Some(self.image_repo.insert(&tx, image_url)?);
        }
        self.element_repo.insert(&tx, &element)?;

        tx.commit()?;

        log::info!("element {} added", element.unique_id);
        Ok(WriteOutcome::ElementCreated {
            unique_id: element.unique_id,
        })
    }

    fn increment(&self, unique_id: &str, counter: ElementCounter) -> AppResult<WriteOutcome> {
        let mut conn = get_connection(&self.pool)?;
        let tx = begin_transaction(&mut conn)?;

        let value = self.element_repo.increment_counter(&tx, unique_id, counter)?;

        tx.commit()?;

        log::debug!("element {} {} -> {}", unique_id, counter.column(), value);
        Ok(WriteOutcome::Counted {
            unique_id: unique_id.to_string(),
            value,
        })
    }

    fn delete(&self, unique_id: &str) -> AppResult<WriteOutcome> {
        let mut conn = get_connection(&self.pool)?;
        let tx = begin_transaction(&mut conn)?;

        self.element_repo.delete(&tx, unique_id)?;

        tx.commit()?;

        log::info!("element {} deleted", unique_id);
        Ok(WriteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::error::message::codes;
    use crate::repositories::{SqliteElementRepository, SqliteImageRepository};

    fn module(pool: &Arc<ConnectionPool>) -> ElementModule {
        ElementModule::new(
            pool.clone(),
            Arc::new(SqliteElementRepository::new(pool.clone())),
            Arc::new(SqliteImageRepository::new()),
        )
    }

    fn count(pool: &ConnectionPool, table: &str) -> i64 {
        pool.get()
            .unwrap()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    fn add(module: &ElementModule, title: &str) -> String {
        let condition = Condition::new()
            .with("url", format!("https://cdn.example.com/{}.mp4", title))
            .with("title", title)
            .with("duration", 42);
        match module.element_operate(&condition, ElementOperation::Add).unwrap() {
            WriteOutcome::ElementCreated { unique_id } => unique_id,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_add_then_detail() {
        let (_dir, pool) = test_pool();
        let module = module(&pool);
        let unique_id = add(&module, "first");

        let set = module
            .get_elements(ElementQuery::Detail { unique_id: unique_id.clone() })
            .unwrap();
        match set {
            ElementSet::One(Some(element)) => {
                assert_eq!(element.unique_id, unique_id);
                assert_eq!(element.duration, 42);
            }
            other => panic!("unexpected set {:?}", other),
        }
    }

    #[test]
    fn test_detail_miss_is_neutral() {
        let (_dir, pool) = test_pool();
        let set = module(&pool)
            .get_elements(ElementQuery::Detail { unique_id: "abc123".to_string() })
            .unwrap();
        assert_eq!(set, ElementSet::One(None));
    }

    #[test]
    fn test_invalid_add_never_writes() {
        let (_dir, pool) = test_pool();
        let module = module(&pool);
        let condition = Condition::new().with("title", "").with("url", "nope");

        let error = module
            .element_operate(&condition, ElementOperation::Add)
            .unwrap_err();
        assert_eq!(error.code(), codes::VALIDATION_FAILED);
        assert!(error.details().unwrap()["fields"].get("title").is_some());
        assert_eq!(count(&pool, "element"), 0);
    }

    #[test]
    fn test_failed_add_rolls_back_poster() {
        let (_dir, pool) = test_pool();
        let module = module(&pool);
        // hero 999 does not exist: the element insert fails after the image insert
        let condition = Condition::new()
            .with("url", "https://cdn.example.com/a.mp4")
            .with("title", "orphan")
            .with("hero_id", 999)
            .with("image_url", "https://img.example.com/a.png");

        let error = module
            .element_operate(&condition, ElementOperation::Add)
            .unwrap_err();
        assert_eq!(error.code(), codes::NOT_FOUND);
        assert_eq!(count(&pool, "image"), 0);
        assert_eq!(count(&pool, "element"), 0);
    }

    #[test]
    fn test_add_with_poster_url_creates_image() {
        let (_dir, pool) = test_pool();
        let module = module(&pool);
        let condition = Condition::new()
            .with("url", "https://cdn.example.com/a.mp4")
            .with("title", "with poster")
            .with("image_url", "https://img.example.com/a.png");
        module.element_operate(&condition, ElementOperation::Add).unwrap();

        let set = module.get_elements(ElementQuery::All).unwrap();
        let ElementSet::Many(elements) = set else {
            panic!("expected a list");
        };
        assert_eq!(elements[0].image_src(), "https://img.example.com/a.png");
    }

    #[test]
    fn test_counters() {
        let (_dir, pool) = test_pool();
        let module = module(&pool);
        let unique_id = add(&module, "clip");
        let condition = Condition::new().with("unique_id", unique_id.clone());

        module.element_operate(&condition, ElementOperation::AddPlayNum).unwrap();
        let outcome = module
            .element_operate(&condition, ElementOperation::AddPlayNum)
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Counted { unique_id: unique_id.clone(), value: 2 });

        let outcome = module
            .element_operate(&condition, ElementOperation::AddRaiseNum)
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Counted { unique_id, value: 1 });
    }

    #[test]
    fn test_counter_on_missing_element_is_not_found() {
        let (_dir, pool) = test_pool();
        let condition = Condition::new().with("unique_id", "abc123");
        let error = module(&pool)
            .element_operate(&condition, ElementOperation::AddPlayNum)
            .unwrap_err();
        assert_eq!(error.code(), codes::NOT_FOUND);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let (_dir, pool) = test_pool();
        let module = Arc::new(module(&pool));
        let unique_id = add(&module, "viral");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let module = module.clone();
                let condition = Condition::new().with("unique_id", unique_id.clone());
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        module
                            .element_operate(&condition, ElementOperation::AddPlayNum)
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let set = module.get_elements(ElementQuery::Detail { unique_id }).unwrap();
        let ElementSet::One(Some(element)) = set else {
            panic!("element missing");
        };
        assert_eq!(element.play_num, 100);
    }

    #[test]
    fn test_delete() {
        let (_dir, pool) = test_pool();
        let module = module(&pool);
        let unique_id = add(&module, "gone");
        let condition = Condition::new().with("unique_id", unique_id);

        assert_eq!(
            module.element_operate(&condition, ElementOperation::Delete).unwrap(),
            WriteOutcome::Deleted
        );
        assert_eq!(
            module
                .element_operate(&condition, ElementOperation::Delete)
                .unwrap_err()
                .code(),
            codes::NOT_FOUND
        );
    }
}
