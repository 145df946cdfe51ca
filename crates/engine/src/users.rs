//! The module contains the `User` model and its `users` table.

use sea_orm::entity::prelude::*;

use crate::{Account, CreditCard, Movement};

/// A registered user.
///
/// Users own movements, credit cards and accounts; children hold a
/// back-reference only and are never embedded here.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Stored trimmed and lower-cased; globally unique.
    pub email: String,
}

/// A user together with the aggregate balance of their accounts.
#[derive(Clone, Debug, PartialEq)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Sum of the balances of all accounts the user owns.
    pub total_balance: f64,
}

/// A user with everything they own, for detail responses.
#[derive(Clone, Debug, PartialEq)]
pub struct UserDetail {
    pub user: User,
    pub movements: Vec<Movement>,
    pub credit_cards: Vec<CreditCard>,
    pub accounts: Vec<Account>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movements::Entity")]
    Movements,
    #[sea_orm(has_many = "super::credit_cards::Entity")]
    CreditCards,
    #[sea_orm(has_many = "super::accounts::Entity")]
    Accounts,
}

impl Related<super::movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl Related<super::credit_cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditCards.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}
