//! Category lifecycle operations.
//!
//! Category names are globally unique regardless of case. The stored form is
//! the trimmed, upper-cased name; the uniqueness check compares lower-cased
//! trimmed values so the casing used at creation never matters.

use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*, sea_query::Expr,
};

use crate::{
    Category, EngineError, ResultEngine, categories,
    util::{normalize_category_name, normalize_required_text},
};

use super::{Engine, with_tx};

impl Engine {
    pub async fn create_category(&self, name: &str) -> ResultEngine<Category> {
        let trimmed = normalize_required_text(name, "Category name")?;
        let stored = normalize_category_name(&trimmed);
        with_tx!(self, |db_tx| {
            ensure_name_available(&db_tx, &trimmed, None).await?;

            let model = categories::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(stored),
            }
            .insert(&db_tx)
            .await?;

            Ok(model.into())
        })
    }

    pub async fn category(&self, category_id: i64) -> ResultEngine<Category> {
        with_tx!(self, |db_tx| {
            let model = require_category(&db_tx, category_id).await?;
            Ok(model.into())
        })
    }

    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        with_tx!(self, |db_tx| {
            let models = categories::Entity::find().all(&db_tx).await?;
            Ok(models.into_iter().map(Into::into).collect())
        })
    }

    /// Rename a category in place. Renaming to a value that only differs in
    /// case or surrounding whitespace from the current name is allowed.
    pub async fn update_category(&self, category_id: i64, name: &str) -> ResultEngine<Category> {
        let trimmed = normalize_required_text(name, "Category name")?;
        let stored = normalize_category_name(&trimmed);
        with_tx!(self, |db_tx| {
            let model = require_category(&db_tx, category_id).await?;
            ensure_name_available(&db_tx, &trimmed, Some(model.id)).await?;

            let mut active: categories::ActiveModel = model.into();
            active.name = ActiveValue::Set(stored);
            let model = active.update(&db_tx).await?;

            Ok(model.into())
        })
    }

    pub async fn delete_category(&self, category_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = require_category(&db_tx, category_id).await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}

pub(super) async fn require_category<C: ConnectionTrait>(
    conn: &C,
    category_id: i64,
) -> ResultEngine<categories::Model> {
    categories::Entity::find_by_id(category_id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("Category with ID {category_id} not found")))
}

async fn ensure_name_available<C: ConnectionTrait>(
    conn: &C,
    trimmed: &str,
    excluding: Option<i64>,
) -> ResultEngine<()> {
    let mut query = categories::Entity::find()
        .filter(Expr::cust("LOWER(name)").eq(trimmed.to_lowercase()));
    if let Some(id) = excluding {
        query = query.filter(categories::Column::Id.ne(id));
    }
    if query.one(conn).await?.is_some() {
        return Err(EngineError::Duplicate(format!(
            "The category '{trimmed}' already exists"
        )));
    }
    Ok(())
}
