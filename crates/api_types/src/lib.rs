//! Wire types shared between the HTTP server and its clients.
//!
//! Every struct here mirrors a request or response body one-to-one. The
//! server maps engine models into these views; clients deserialize them
//! without pulling in the engine crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a movement.
///
/// Serialized as `"income"` or `"expense"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Income,
    Expense,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserCreate {
        pub name: String,
        pub email: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserUpdate {
        pub name: String,
        pub email: String,
    }

    /// Compact user view embedded in other responses.
    ///
    /// `total_balance` is the sum of the balances of the user's accounts.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserSummary {
        pub id: i64,
        pub name: String,
        pub email: String,
        pub total_balance: f64,
    }

    /// Full user view returned by the single-user and list endpoints.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct User {
        pub id: i64,
        pub name: String,
        pub email: String,
        pub movements: Vec<super::movement::Movement>,
        pub credit_cards: Vec<super::credit_card::CreditCardSummary>,
        pub accounts: Vec<super::account::AccountSummary>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Category {
        pub id: i64,
        pub name: String,
    }
}

pub mod credit_card {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CreditCardCreate {
        pub name: String,
        pub last_four_digits: String,
        pub statement_close: String,
        pub max_payment_due: String,
        pub user_id: i64,
    }

    /// Card labels only; ownership is fixed at creation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CreditCardUpdate {
        pub name: String,
        pub last_four_digits: String,
        pub statement_close: String,
        pub max_payment_due: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CreditCardSummary {
        pub id: i64,
        pub name: String,
        pub last_four_digits: String,
        pub statement_close: String,
        pub max_payment_due: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CreditCard {
        pub id: i64,
        pub name: String,
        pub last_four_digits: String,
        pub statement_close: String,
        pub max_payment_due: String,
        pub user: super::user::UserSummary,
    }
}

pub mod account {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountCreate {
        pub bank: String,
        pub account_number: String,
        pub user_id: i64,
    }

    /// Balance is never set directly; it only moves through movements.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountUpdate {
        pub bank: String,
        pub account_number: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountSummary {
        pub id: i64,
        pub bank: String,
        pub account_number: String,
        pub balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Account {
        pub id: i64,
        pub bank: String,
        pub account_number: String,
        pub balance: f64,
        pub user: super::user::UserSummary,
    }
}

pub mod movement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MovementCreate {
        pub kind: MovementKind,
        pub amount: f64,
        pub note: Option<String>,
        pub user_id: i64,
        pub category_id: i64,
        pub credit_card_id: Option<i64>,
        pub account_id: Option<i64>,
    }

    /// Same shape as [`MovementCreate`]; the stored date is preserved on
    /// update and balances are left untouched.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MovementUpdate {
        pub kind: MovementKind,
        pub amount: f64,
        pub note: Option<String>,
        pub user_id: i64,
        pub category_id: i64,
        pub credit_card_id: Option<i64>,
        pub account_id: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Movement {
        pub id: i64,
        pub kind: MovementKind,
        pub amount: f64,
        pub date: DateTime<Utc>,
        pub note: Option<String>,
        pub user: super::user::UserSummary,
        pub category: super::category::Category,
        pub credit_card: Option<super::credit_card::CreditCardSummary>,
        pub account: Option<super::account::AccountSummary>,
    }
}
