// src/modules/theme_module.rs
//
// Theme Module - curated element groups
//
// RULES:
// - A theme and its element links are written in one transaction
// - A link to a missing element aborts the whole add

use std::sync::Arc;

use strum::{AsRefStr, EnumIter, EnumString};

use crate::condition::Condition;
use crate::db::{begin_transaction, get_connection, ConnectionPool};
use crate::domain::Theme;
use crate::error::{AppResult, ModuleResult};
use crate::modules::WriteOutcome;
use crate::repositories::ThemeRepository;
use crate::validation::{AddTheme, FormValidator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeQuery {
    /// Enabled themes in `sort` order
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ThemeOperation {
    Add,
    Enable,
    Disable,
}

pub struct ThemeModule {
    pool: Arc<ConnectionPool>,
    theme_repo: Arc<dyn ThemeRepository>,
}

impl ThemeModule {
    pub fn new(pool: Arc<ConnectionPool>, theme_repo: Arc<dyn ThemeRepository>) -> Self {
        Self { pool, theme_repo }
    }

    pub fn get_theme_list(&self, query: ThemeQuery) -> ModuleResult<Vec<Theme>> {
        log::debug!("theme query {:?}", query);

        match query {
            ThemeQuery::Enabled => Ok(self.theme_repo.list_enabled()?),
        }
    }

    pub fn theme_operate(
        &self,
        condition: &Condition,
        operation: ThemeOperation,
    ) -> ModuleResult<WriteOutcome> {
        match operation {
            ThemeOperation::Add => {
                let form = FormValidator::<AddTheme>::new(condition).into_result()?;
                Ok(self.add_theme(form)?)
            }
            ThemeOperation::Enable => {
                Ok(self.set_enabled(condition.get_i64("theme_id").unwrap_or(0), true)?)
            }
            ThemeOperation::Disable => {
                Ok(self.set_enabled(condition.get_i64("theme_id").unwrap_or(0), false)?)
            }
        }
    }

    fn add_theme(&self, form: AddTheme) -> AppResult<WriteOutcome> {
        let mut conn = get_connection(&self.pool)?;
        let tx = begin_transaction(&mut conn)?;

        let theme_id = self
            .theme_repo
            .insert(&tx, form.name.trim(), form.image_id, form.sort)?;

        for (position, unique_id) in form.element_ids.iter().enumerate() {
            self.theme_repo
                .link_element(&tx, theme_id, unique_id, position as i64)?;
        }

        tx.commit()?;

        log::info!(
            "theme {} added with {} elements",
            theme_id,
            form.element_ids.len()
        );
        Ok(WriteOutcome::Created { id: theme_id })
    }

    fn set_enabled(&self, theme_id: i64, enabled: bool) -> AppResult<WriteOutcome> {
        let mut conn = get_connection(&self.pool)?;
        let tx = begin_transaction(&mut conn)?;

        self.theme_repo.set_enabled(&tx, theme_id, enabled)?;

        tx.commit()?;

        log::info!("theme {} enabled={}", theme_id, enabled);
        Ok(WriteOutcome::Updated { id: theme_id })
    }
}
