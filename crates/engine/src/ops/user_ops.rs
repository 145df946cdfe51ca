//! User lifecycle operations.

use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, UserDetail, UserSummary, accounts, credit_cards, movements, users,
    util::{normalize_email, normalize_required_text},
};

use super::{Engine, movement_ops, with_tx};

impl Engine {
    /// Register a new user. The email is stored trimmed and lower-cased and
    /// must be unique across all users.
    pub async fn create_user(&self, name: &str, email: &str) -> ResultEngine<UserDetail> {
        let name = normalize_required_text(name, "User name")?;
        let email = normalize_email(email);
        with_tx!(self, |db_tx| {
            ensure_email_available(&db_tx, &email, None).await?;

            let model = users::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                email: ActiveValue::Set(email),
            }
            .insert(&db_tx)
            .await?;

            user_detail(&db_tx, model).await
        })
    }

    /// Return a user with everything they own.
    pub async fn user(&self, user_id: i64) -> ResultEngine<UserDetail> {
        with_tx!(self, |db_tx| {
            let model = require_user(&db_tx, user_id).await?;
            user_detail(&db_tx, model).await
        })
    }

    pub async fn list_users(&self) -> ResultEngine<Vec<UserDetail>> {
        with_tx!(self, |db_tx| {
            let models = users::Entity::find().all(&db_tx).await?;
            let mut out = Vec::with_capacity(models.len());
            for model in models {
                out.push(user_detail(&db_tx, model).await?);
            }
            Ok(out)
        })
    }

    /// Return a user summary, including the total balance of their accounts.
    pub async fn user_summary(&self, user_id: i64) -> ResultEngine<UserSummary> {
        with_tx!(self, |db_tx| {
            let model = require_user(&db_tx, user_id).await?;
            summarize_user(&db_tx, &model).await
        })
    }

    /// Look a user up by email. The input is normalized before the lookup, so
    /// any casing or surrounding whitespace matches the stored form.
    pub async fn user_by_email(&self, email: &str) -> ResultEngine<UserSummary> {
        let email = normalize_email(email);
        with_tx!(self, |db_tx| {
            let model = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::NotFound(format!("User with email {email} not found"))
                })?;
            summarize_user(&db_tx, &model).await
        })
    }

    /// Update a user's name and email in place. The uniqueness check excludes
    /// the user's own record, so re-submitting the current email never fails.
    pub async fn update_user(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
    ) -> ResultEngine<UserDetail> {
        let name = normalize_required_text(name, "User name")?;
        let email = normalize_email(email);
        with_tx!(self, |db_tx| {
            let model = require_user(&db_tx, user_id).await?;
            ensure_email_available(&db_tx, &email, Some(model.id)).await?;

            let mut active: users::ActiveModel = model.into();
            active.name = ActiveValue::Set(name);
            active.email = ActiveValue::Set(email);
            let model = active.update(&db_tx).await?;

            user_detail(&db_tx, model).await
        })
    }

    pub async fn delete_user(&self, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = require_user(&db_tx, user_id).await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}

/// Fail with the id-keyed message used by the user endpoints.
pub(super) async fn require_user<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
) -> ResultEngine<users::Model> {
    users::Entity::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("User with ID {user_id} not found")))
}

async fn ensure_email_available<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    excluding: Option<i64>,
) -> ResultEngine<()> {
    let mut query = users::Entity::find().filter(users::Column::Email.eq(email));
    if let Some(id) = excluding {
        query = query.filter(users::Column::Id.ne(id));
    }
    if query.one(conn).await?.is_some() {
        return Err(EngineError::Duplicate(format!(
            "Email already registered: {email}"
        )));
    }
    Ok(())
}

/// Build a summary with the aggregate balance of the user's accounts.
pub(super) async fn summarize_user<C: ConnectionTrait>(
    conn: &C,
    model: &users::Model,
) -> ResultEngine<UserSummary> {
    let total_balance = accounts::Entity::find()
        .filter(accounts::Column::UserId.eq(model.id))
        .all(conn)
        .await?
        .iter()
        .map(|account| account.balance)
        .sum();

    Ok(UserSummary {
        id: model.id,
        name: model.name.clone(),
        email: model.email.clone(),
        total_balance,
    })
}

async fn user_detail<C: ConnectionTrait>(
    conn: &C,
    model: users::Model,
) -> ResultEngine<UserDetail> {
    let movement_models = movements::Entity::find()
        .filter(movements::Column::UserId.eq(model.id))
        .all(conn)
        .await?;
    let mut user_movements = Vec::with_capacity(movement_models.len());
    for movement in movement_models {
        user_movements.push(movement_ops::movement_detail(conn, movement).await?);
    }

    let user_cards = credit_cards::Entity::find()
        .filter(credit_cards::Column::UserId.eq(model.id))
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let user_accounts = accounts::Entity::find()
        .filter(accounts::Column::UserId.eq(model.id))
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(UserDetail {
        user: model.into(),
        movements: user_movements,
        credit_cards: user_cards,
        accounts: user_accounts,
    })
}
