//! The module contains the `Account` model and its `accounts` table.

use sea_orm::entity::prelude::*;

use crate::UserSummary;

/// A bank account owned by a user.
///
/// The balance reflects the net effect of the income and expense movements
/// posted against the account at creation time. It is mutated only by the
/// movement-posting path; movement updates and deletions leave it untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub id: i64,
    pub bank: String,
    /// Stored trimmed with whitespace and hyphens stripped; globally unique.
    pub account_number: String,
    pub balance: f64,
}

/// An account together with its owner.
#[derive(Clone, Debug, PartialEq)]
pub struct AccountDetail {
    pub account: Account,
    pub user: UserSummary,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bank: String,
    pub account_number: String,
    pub balance: f64,
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

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            bank: model.bank,
            account_number: model.account_number,
            balance: model.balance,
        }
    }
}
