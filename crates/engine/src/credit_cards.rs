//! The module contains the `CreditCard` model and its `credit_cards` table.

use sea_orm::entity::prelude::*;

use crate::UserSummary;

/// A credit card registered by a user.
///
/// Cards carry no balance semantics; they only label movements. The
/// statement-close and payment-due fields are free-form labels.
#[derive(Clone, Debug, PartialEq)]
pub struct CreditCard {
    pub id: i64,
    pub name: String,
    pub last_four_digits: String,
    pub statement_close: String,
    pub max_payment_due: String,
}

/// A credit card together with its owner.
#[derive(Clone, Debug, PartialEq)]
pub struct CreditCardDetail {
    pub card: CreditCard,
    pub user: UserSummary,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "credit_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub last_four_digits: String,
    pub statement_close: String,
    pub max_payment_due: String,
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(has_many = "super::movements::Entity")]
    Movements,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CreditCard {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            last_four_digits: model.last_four_digits,
            statement_close: model.statement_close,
            max_payment_due: model.max_payment_due,
        }
    }
}
