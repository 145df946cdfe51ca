//! Account lifecycle operations.
//!
//! Account numbers are stored de-formatted (trimmed, whitespace and hyphens
//! stripped) and are globally unique in that canonical form. Balances start
//! at zero and are touched only by the movement-posting path.

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    AccountDetail, EngineError, ResultEngine, accounts,
    util::{normalize_account_number, normalize_required_text},
};

use super::{Engine, resolve_user, user_ops, with_tx};

impl Engine {
    pub async fn create_account(
        &self,
        bank: &str,
        account_number: &str,
        user_id: i64,
    ) -> ResultEngine<AccountDetail> {
        let bank = normalize_required_text(bank, "Bank name")?;
        let number = normalize_account_number(account_number);
        with_tx!(self, |db_tx| {
            ensure_number_available(&db_tx, &number, account_number, None).await?;
            let owner = resolve_user(&db_tx, user_id).await?;

            let model = accounts::ActiveModel {
                id: ActiveValue::NotSet,
                bank: ActiveValue::Set(bank),
                account_number: ActiveValue::Set(number),
                balance: ActiveValue::Set(0.0),
                user_id: ActiveValue::Set(owner.id),
            }
            .insert(&db_tx)
            .await?;

            let user = user_ops::summarize_user(&db_tx, &owner).await?;
            Ok(AccountDetail {
                account: model.into(),
                user,
            })
        })
    }

    pub async fn account(&self, account_id: i64) -> ResultEngine<AccountDetail> {
        with_tx!(self, |db_tx| {
            let model = require_account(&db_tx, account_id).await?;
            account_detail(&db_tx, model).await
        })
    }

    pub async fn list_accounts(&self) -> ResultEngine<Vec<AccountDetail>> {
        with_tx!(self, |db_tx| {
            let models = accounts::Entity::find().all(&db_tx).await?;
            let mut out = Vec::with_capacity(models.len());
            for model in models {
                out.push(account_detail(&db_tx, model).await?);
            }
            Ok(out)
        })
    }

    /// List the accounts a user owns. The user is resolved first, so an
    /// unknown user id fails instead of yielding an empty list.
    pub async fn list_accounts_by_user(&self, user_id: i64) -> ResultEngine<Vec<AccountDetail>> {
        with_tx!(self, |db_tx| {
            user_ops::require_user(&db_tx, user_id).await?;
            let models = accounts::Entity::find()
                .filter(accounts::Column::UserId.eq(user_id))
                .all(&db_tx)
                .await?;
            let mut out = Vec::with_capacity(models.len());
            for model in models {
                out.push(account_detail(&db_tx, model).await?);
            }
            Ok(out)
        })
    }

    /// Update an account's bank and number in place. The owner and the
    /// balance are left untouched; re-submitting the current number never
    /// collides with itself.
    pub async fn update_account(
        &self,
        account_id: i64,
        bank: &str,
        account_number: &str,
    ) -> ResultEngine<AccountDetail> {
        let bank = normalize_required_text(bank, "Bank name")?;
        let number = normalize_account_number(account_number);
        with_tx!(self, |db_tx| {
            let model = require_account(&db_tx, account_id).await?;
            ensure_number_available(&db_tx, &number, account_number, Some(model.id)).await?;

            let mut active: accounts::ActiveModel = model.into();
            active.bank = ActiveValue::Set(bank);
            active.account_number = ActiveValue::Set(number);
            let model = active.update(&db_tx).await?;

            account_detail(&db_tx, model).await
        })
    }

    /// Remove an account. Movements that referenced it keep their recorded
    /// amounts; nothing is reversed.
    pub async fn delete_account(&self, account_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = require_account(&db_tx, account_id).await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}

pub(super) async fn require_account<C: ConnectionTrait>(
    conn: &C,
    account_id: i64,
) -> ResultEngine<accounts::Model> {
    accounts::Entity::find_by_id(account_id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("Account with ID {account_id} not found")))
}

/// The lookup uses the normalized number; the message echoes the number as
/// the caller wrote it.
async fn ensure_number_available<C: ConnectionTrait>(
    conn: &C,
    number: &str,
    as_given: &str,
    excluding: Option<i64>,
) -> ResultEngine<()> {
    let mut query = accounts::Entity::find().filter(accounts::Column::AccountNumber.eq(number));
    if let Some(id) = excluding {
        query = query.filter(accounts::Column::Id.ne(id));
    }
    if query.one(conn).await?.is_some() {
        return Err(EngineError::Duplicate(format!(
            "Account number already exists: {as_given}"
        )));
    }
    Ok(())
}

async fn account_detail<C: ConnectionTrait>(
    conn: &C,
    model: accounts::Model,
) -> ResultEngine<AccountDetail> {
    let owner = resolve_user(conn, model.user_id).await?;
    let user = user_ops::summarize_user(conn, &owner).await?;
    Ok(AccountDetail {
        account: model.into(),
        user,
    })
}
