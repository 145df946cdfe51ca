//! The module contains the `Movement` model and its `movements` table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::{Account, Category, CreditCard, EngineError, UserSummary};

/// Whether a movement adds to or subtracts from an account balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementKind {
    Income,
    Expense,
}

impl MovementKind {
    /// Returns the canonical kind string used in the database and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for MovementKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidRequest(format!(
                "unknown movement kind: {other}"
            ))),
        }
    }
}

/// An income or expense record, with its references resolved.
///
/// The date is stamped by the engine at creation; callers never supply it,
/// and updates keep the stored value.
#[derive(Clone, Debug, PartialEq)]
pub struct Movement {
    pub id: i64,
    pub kind: MovementKind,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub note: Option<String>,
    pub user: UserSummary,
    pub category: Category,
    pub credit_card: Option<CreditCard>,
    pub account: Option<Account>,
}

/// Caller-supplied fields for creating or updating a movement.
#[derive(Clone, Debug)]
pub struct MovementDraft {
    pub kind: MovementKind,
    pub amount: f64,
    pub note: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
    pub credit_card_id: Option<i64>,
    pub account_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub kind: String,
    pub amount: f64,
    pub date: DateTimeUtc,
    pub note: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
    pub credit_card_id: Option<i64>,
    pub account_id: Option<i64>,
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
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Categories,
    #[sea_orm(
        belongs_to = "super::credit_cards::Entity",
        from = "Column::CreditCardId",
        to = "super::credit_cards::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    CreditCards,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Accounts,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_its_string_form() {
        assert_eq!(
            MovementKind::try_from(MovementKind::Income.as_str()).unwrap(),
            MovementKind::Income
        );
        assert_eq!(
            MovementKind::try_from(MovementKind::Expense.as_str()).unwrap(),
            MovementKind::Expense
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(MovementKind::try_from("transfer").is_err());
    }
}
