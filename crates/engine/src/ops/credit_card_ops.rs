//! Credit card lifecycle operations.
//!
//! Cards have no balance semantics and no unique fields; they are labels a
//! movement can point at.

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    CreditCardDetail, EngineError, ResultEngine, credit_cards, util::normalize_required_text,
};

use super::{Engine, resolve_user, user_ops, with_tx};

/// Caller-supplied card fields, shared by create and update.
#[derive(Clone, Debug)]
pub struct CreditCardFields {
    pub name: String,
    pub last_four_digits: String,
    pub statement_close: String,
    pub max_payment_due: String,
}

impl Engine {
    pub async fn create_credit_card(
        &self,
        fields: CreditCardFields,
        user_id: i64,
    ) -> ResultEngine<CreditCardDetail> {
        let name = normalize_required_text(&fields.name, "Card name")?;
        with_tx!(self, |db_tx| {
            let owner = resolve_user(&db_tx, user_id).await?;

            let model = credit_cards::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                last_four_digits: ActiveValue::Set(fields.last_four_digits),
                statement_close: ActiveValue::Set(fields.statement_close),
                max_payment_due: ActiveValue::Set(fields.max_payment_due),
                user_id: ActiveValue::Set(owner.id),
            }
            .insert(&db_tx)
            .await?;

            let user = user_ops::summarize_user(&db_tx, &owner).await?;
            Ok(CreditCardDetail {
                card: model.into(),
                user,
            })
        })
    }

    pub async fn credit_card(&self, card_id: i64) -> ResultEngine<CreditCardDetail> {
        with_tx!(self, |db_tx| {
            let model = require_credit_card(&db_tx, card_id).await?;
            card_detail(&db_tx, model).await
        })
    }

    pub async fn list_credit_cards(&self) -> ResultEngine<Vec<CreditCardDetail>> {
        with_tx!(self, |db_tx| {
            let models = credit_cards::Entity::find().all(&db_tx).await?;
            let mut out = Vec::with_capacity(models.len());
            for model in models {
                out.push(card_detail(&db_tx, model).await?);
            }
            Ok(out)
        })
    }

    /// List the cards a user owns, failing if the user does not exist.
    pub async fn list_credit_cards_by_user(
        &self,
        user_id: i64,
    ) -> ResultEngine<Vec<CreditCardDetail>> {
        with_tx!(self, |db_tx| {
            user_ops::require_user(&db_tx, user_id).await?;
            let models = credit_cards::Entity::find()
                .filter(credit_cards::Column::UserId.eq(user_id))
                .all(&db_tx)
                .await?;
            let mut out = Vec::with_capacity(models.len());
            for model in models {
                out.push(card_detail(&db_tx, model).await?);
            }
            Ok(out)
        })
    }

    /// Update a card's labels in place. The owner is never reassigned.
    pub async fn update_credit_card(
        &self,
        card_id: i64,
        fields: CreditCardFields,
    ) -> ResultEngine<CreditCardDetail> {
        let name = normalize_required_text(&fields.name, "Card name")?;
        with_tx!(self, |db_tx| {
            let model = require_credit_card(&db_tx, card_id).await?;

            let mut active: credit_cards::ActiveModel = model.into();
            active.name = ActiveValue::Set(name);
            active.last_four_digits = ActiveValue::Set(fields.last_four_digits);
            active.statement_close = ActiveValue::Set(fields.statement_close);
            active.max_payment_due = ActiveValue::Set(fields.max_payment_due);
            let model = active.update(&db_tx).await?;

            card_detail(&db_tx, model).await
        })
    }

    pub async fn delete_credit_card(&self, card_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = require_credit_card(&db_tx, card_id).await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}

pub(super) async fn require_credit_card<C: ConnectionTrait>(
    conn: &C,
    card_id: i64,
) -> ResultEngine<credit_cards::Model> {
    credit_cards::Entity::find_by_id(card_id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::NotFound(format!("Credit card with ID {card_id} not found")))
}

async fn card_detail<C: ConnectionTrait>(
    conn: &C,
    model: credit_cards::Model,
) -> ResultEngine<CreditCardDetail> {
    let owner = resolve_user(conn, model.user_id).await?;
    let user = user_ops::summarize_user(conn, &owner).await?;
    Ok(CreditCardDetail {
        card: model.into(),
        user,
    })
}
