//! Movement posting and lifecycle operations.
//!
//! Posting is the only path that touches an account balance. The balance
//! write and the movement insert happen inside one DB transaction, so a
//! rejected movement leaves the account exactly as it was. Updating or
//! deleting a movement is deliberately balance-neutral: the net effect an
//! account has seen is the sum of the movements *created* against it.

use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, Movement, MovementDraft, MovementKind, ResultEngine, accounts, movements,
    util::{normalize_optional_text, validate_amount},
};

use super::{
    Engine, category_ops, resolve_account, resolve_category, resolve_credit_card, resolve_user,
    user_ops, with_tx,
};

impl Engine {
    /// Post a new movement.
    ///
    /// References are resolved in a fixed order (user, category, credit card,
    /// account) and the first missing one aborts the operation. If an account
    /// is linked, an income raises its balance and an expense lowers it; an
    /// expense larger than the current balance is rejected before anything is
    /// written. The movement date is stamped here, never by the caller.
    pub async fn create_movement(&self, draft: MovementDraft) -> ResultEngine<Movement> {
        let amount = validate_amount(draft.amount)?;
        let note = normalize_optional_text(draft.note.as_deref());
        let date = Utc::now();

        with_tx!(self, |db_tx| {
            let user = resolve_user(&db_tx, draft.user_id).await?;
            let category = resolve_category(&db_tx, draft.category_id).await?;
            let card = resolve_credit_card(&db_tx, draft.credit_card_id).await?;
            let account = resolve_account(&db_tx, draft.account_id).await?;

            // Ledger step: settle the account balance before the movement row
            // exists, inside the same transaction.
            let account = match account {
                None => None,
                Some(model) => {
                    let new_balance = post_against_balance(draft.kind, amount, model.balance)?;
                    let mut active: accounts::ActiveModel = model.into();
                    active.balance = ActiveValue::Set(new_balance);
                    Some(active.update(&db_tx).await?)
                }
            };

            let model = movements::ActiveModel {
                id: ActiveValue::NotSet,
                kind: ActiveValue::Set(draft.kind.as_str().to_string()),
                amount: ActiveValue::Set(amount),
                date: ActiveValue::Set(date),
                note: ActiveValue::Set(note),
                user_id: ActiveValue::Set(user.id),
                category_id: ActiveValue::Set(category.id),
                credit_card_id: ActiveValue::Set(card.as_ref().map(|c| c.id)),
                account_id: ActiveValue::Set(account.as_ref().map(|a| a.id)),
            }
            .insert(&db_tx)
            .await?;

            let user = user_ops::summarize_user(&db_tx, &user).await?;
            Ok(Movement {
                id: model.id,
                kind: draft.kind,
                amount,
                date,
                note: model.note,
                user,
                category: category.into(),
                credit_card: card.map(Into::into),
                account: account.map(Into::into),
            })
        })
    }

    pub async fn movement(&self, movement_id: i64) -> ResultEngine<Movement> {
        with_tx!(self, |db_tx| {
            let model = require_movement(&db_tx, movement_id).await?;
            movement_detail(&db_tx, model).await
        })
    }

    pub async fn list_movements(&self) -> ResultEngine<Vec<Movement>> {
        with_tx!(self, |db_tx| {
            let models = movements::Entity::find().all(&db_tx).await?;
            collect_details(&db_tx, models).await
        })
    }

    /// List a user's movements, failing if the user does not exist.
    pub async fn list_movements_by_user(&self, user_id: i64) -> ResultEngine<Vec<Movement>> {
        with_tx!(self, |db_tx| {
            user_ops::require_user(&db_tx, user_id).await?;
            let models = movements::Entity::find()
                .filter(movements::Column::UserId.eq(user_id))
                .all(&db_tx)
                .await?;
            collect_details(&db_tx, models).await
        })
    }

    /// List a user's movements in one category. Both foreign keys are
    /// resolved before listing.
    pub async fn list_movements_by_user_and_category(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> ResultEngine<Vec<Movement>> {
        with_tx!(self, |db_tx| {
            user_ops::require_user(&db_tx, user_id).await?;
            category_ops::require_category(&db_tx, category_id).await?;
            let models = movements::Entity::find()
                .filter(movements::Column::UserId.eq(user_id))
                .filter(movements::Column::CategoryId.eq(category_id))
                .all(&db_tx)
                .await?;
            collect_details(&db_tx, models).await
        })
    }

    /// Overwrite a movement's fields and references.
    ///
    /// References are re-resolved with the same order and failure semantics
    /// as on create, but no ledger re-evaluation happens: balances keep the
    /// effect of the original posting, and the stored date is preserved.
    pub async fn update_movement(
        &self,
        movement_id: i64,
        draft: MovementDraft,
    ) -> ResultEngine<Movement> {
        let amount = validate_amount(draft.amount)?;
        let note = normalize_optional_text(draft.note.as_deref());

        with_tx!(self, |db_tx| {
            let model = require_movement(&db_tx, movement_id).await?;
            let user = resolve_user(&db_tx, draft.user_id).await?;
            let category = resolve_category(&db_tx, draft.category_id).await?;
            let card = resolve_credit_card(&db_tx, draft.credit_card_id).await?;
            let account = resolve_account(&db_tx, draft.account_id).await?;

            let date = model.date;
            let mut active: movements::ActiveModel = model.into();
            active.kind = ActiveValue::Set(draft.kind.as_str().to_string());
            active.amount = ActiveValue::Set(amount);
            active.note = ActiveValue::Set(note);
            active.user_id = ActiveValue::Set(user.id);
            active.category_id = ActiveValue::Set(category.id);
            active.credit_card_id = ActiveValue::Set(card.as_ref().map(|c| c.id));
            active.account_id = ActiveValue::Set(account.as_ref().map(|a| a.id));
            let model = active.update(&db_tx).await?;

            let user = user_ops::summarize_user(&db_tx, &user).await?;
            Ok(Movement {
                id: model.id,
                kind: draft.kind,
                amount,
                date,
                note: model.note,
                user,
                category: category.into(),
                credit_card: card.map(Into::into),
                account: account.map(Into::into),
            })
        })
    }

    /// Remove a movement. Any balance effect it had at creation stays.
    pub async fn delete_movement(&self, movement_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = require_movement(&db_tx, movement_id).await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}

/// Compute the balance an account ends up with after a posting.
fn post_against_balance(kind: MovementKind, amount: f64, balance: f64) -> ResultEngine<f64> {
    match kind {
        MovementKind::Income => Ok(balance + amount),
        MovementKind::Expense => {
            if amount > balance {
                return Err(EngineError::InvalidRequest(
                    "Insufficient balance in account".to_string(),
                ));
            }
            Ok(balance - amount)
        }
    }
}

async fn require_movement<C: ConnectionTrait>(
    conn: &C,
    movement_id: i64,
) -> ResultEngine<movements::Model> {
    movements::Entity::find_by_id(movement_id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("Movement with ID {movement_id} not found")))
}

/// Resolve a stored movement's references into a full detail struct.
pub(super) async fn movement_detail<C: ConnectionTrait>(
    conn: &C,
    model: movements::Model,
) -> ResultEngine<Movement> {
    let kind = MovementKind::try_from(model.kind.as_str())?;
    let user = resolve_user(conn, model.user_id).await?;
    let category = resolve_category(conn, model.category_id).await?;
    let card = resolve_credit_card(conn, model.credit_card_id).await?;
    let account = resolve_account(conn, model.account_id).await?;
    let user = user_ops::summarize_user(conn, &user).await?;

    Ok(Movement {
        id: model.id,
        kind,
        amount: model.amount,
        date: model.date,
        note: model.note,
        user,
        category: category.into(),
        credit_card: card.map(Into::into),
        account: account.map(Into::into),
    })
}

async fn collect_details<C: ConnectionTrait>(
    conn: &C,
    models: Vec<movements::Model>,
) -> ResultEngine<Vec<Movement>> {
    let mut out = Vec::with_capacity(models.len());
    for model in models {
        out.push(movement_detail(conn, model).await?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_raises_the_balance() {
        assert_eq!(
            post_against_balance(MovementKind::Income, 200.0, 1000.0).unwrap(),
            1200.0
        );
    }

    #[test]
    fn expense_within_balance_lowers_it() {
        assert_eq!(
            post_against_balance(MovementKind::Expense, 150.0, 400.0).unwrap(),
            250.0
        );
    }

    #[test]
    fn expense_over_balance_is_rejected() {
        let err = post_against_balance(MovementKind::Expense, 300.0, 100.0).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidRequest("Insufficient balance in account".to_string())
        );
    }

    #[test]
    fn expense_equal_to_balance_empties_the_account() {
        assert_eq!(
            post_against_balance(MovementKind::Expense, 100.0, 100.0).unwrap(),
            0.0
        );
    }
}
