// src/modules/hero_module.rs
//
// Hero Module - heroes and hero types

use std::sync::Arc;

use strum::{AsRefStr, EnumIter, EnumString};

use crate::condition::Condition;
use crate::db::{begin_transaction, get_connection, ConnectionPool};
use crate::domain::{validate_name, Hero, HeroType};
use crate::error::{AppResult, ModuleResult};
use crate::modules::WriteOutcome;
use crate::repositories::{HeroChanges, HeroRepository};
use crate::validation::{AddHero, AddHeroType, FormValidator, UpdateHero, UpdateHeroType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroQuery {
    /// Heroes of one type
    TypeId { type_id: i64 },
    /// Every type with its heroes
    TypeHero,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeroSet {
    Heroes(Vec<Hero>),
    Types(Vec<HeroType>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum HeroOperation {
    Add,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum HeroTypeOperation {
    Add,
    Update,
    Delete,
}

pub struct HeroModule {
    pool: Arc<ConnectionPool>,
    hero_repo: Arc<dyn HeroRepository>,
}

impl HeroModule {
    pub fn new(pool: Arc<ConnectionPool>, hero_repo: Arc<dyn HeroRepository>) -> Self {
        Self { pool, hero_repo }
    }

    pub fn get_hero_list(&self, query: HeroQuery) -> ModuleResult<HeroSet> {
        log::debug!("hero query {:?}", query);

        let set = match query {
            HeroQuery::TypeId { type_id } => HeroSet::Heroes(self.hero_repo.list_by_type(type_id)?),
            HeroQuery::TypeHero => HeroSet::Types(self.hero_repo.list_types_with_heroes()?),
        };

        Ok(set)
    }

    pub fn get_all_hero_type(&self) -> ModuleResult<Vec<HeroType>> {
        Ok(self.hero_repo.list_types()?)
    }

    pub fn hero_operate(
        &self,
        condition: &Condition,
        operation: HeroOperation,
    ) -> ModuleResult<WriteOutcome> {
        match operation {
            HeroOperation::Add => {
                let form = FormValidator::<AddHero>::new(condition).into_result()?;
                Ok(self.add_hero(form)?)
            }
            HeroOperation::Update => {
                let form = FormValidator::<UpdateHero>::new(condition).into_result()?;
                Ok(self.update_hero(form)?)
            }
            HeroOperation::Delete => {
                let hero_id = condition.get_i64("hero_id").unwrap_or(0);
                Ok(self.write(|conn| {
                    self.hero_repo.delete_hero(conn, hero_id)?;
                    Ok(WriteOutcome::Deleted)
                })?)
            }
        }
    }

    pub fn hero_type_operate(
        &self,
        condition: &Condition,
        operation: HeroTypeOperation,
    ) -> ModuleResult<WriteOutcome> {
        match operation {
            HeroTypeOperation::Add => {
                let form = FormValidator::<AddHeroType>::new(condition).into_result()?;
                validate_name(&form.name)?;
                Ok(self.write(|conn| {
                    let id = self.hero_repo.insert_type(conn, form.name.trim())?;
                    log::info!("hero type {} added", id);
                    Ok(WriteOutcome::Created { id })
                })?)
            }
            HeroTypeOperation::Update => {
                let form = FormValidator::<UpdateHeroType>::new(condition).into_result()?;
                validate_name(&form.name)?;
                Ok(self.write(|conn| {
                    self.hero_repo.update_type(conn, form.type_id, form.name.trim())?;
                    Ok(WriteOutcome::Updated { id: form.type_id })
                })?)
            }
            HeroTypeOperation::Delete => {
                let type_id = condition.get_i64("type_id").unwrap_or(0);
                Ok(self.write(|conn| {
                    self.hero_repo.delete_type(conn, type_id)?;
                    log::info!("hero type {} deleted", type_id);
                    Ok(WriteOutcome::Deleted)
                })?)
            }
        }
    }

    fn add_hero(&self, form: AddHero) -> AppResult<WriteOutcome> {
        validate_name(&form.name)?;

        self.write(|conn| {
            let id = self
                .hero_repo
                .insert_hero(conn, form.type_id, form.name.trim(), form.image_id)?;
            log::info!("hero {} added to type {}", id, form.type_id);
            Ok(WriteOutcome::Created { id })
        })
    }

    fn update_hero(&self, form: UpdateHero) -> AppResult<WriteOutcome> {
        if let Some(name) = &form.name {
            validate_name(name)?;
        }

        let changes = HeroChanges {
            name: form.name.map(|n| n.trim().to_string()),
            type_id: form.type_id,
            image_id: form.image_id,
        };

        self.write(|conn| {
            self.hero_repo.update_hero(conn, form.hero_id, &changes)?;
            Ok(WriteOutcome::Updated { id: form.hero_id })
        })
    }

    /// Run `f` inside one transaction; anything but `Ok` rolls back
    fn write<F>(&self, f: F) -> AppResult<WriteOutcome>
    where
        F: FnOnce(&rusqlite::Connection) -> AppResult<WriteOutcome>,
    {
        let mut conn = get_connection(&self.pool)?;
        let tx = begin_transaction(&mut conn)?;
        let outcome = f(&*tx)?;
        tx.commit()?;
        Ok(outcome)
    }
}
