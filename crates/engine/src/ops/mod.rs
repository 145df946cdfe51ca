use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait};

use crate::{ResultEngine, accounts, categories, credit_cards, error::EngineError, users};

mod account_ops;
mod category_ops;
mod credit_card_ops;
mod movement_ops;
mod user_ops;

pub use credit_card_ops::CreditCardFields;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Resolve the owning user of a movement, account or credit card.
///
/// The short message matches the one callers see when a create request names
/// a user that does not exist.
pub(super) async fn resolve_user<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
) -> ResultEngine<users::Model> {
    users::Entity::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::NotFound("User not found".to_string()))
}

pub(super) async fn resolve_category<C: ConnectionTrait>(
    conn: &C,
    category_id: i64,
) -> ResultEngine<categories::Model> {
    categories::Entity::find_by_id(category_id)
        .one(conn)
        .await?
        .ok_or_else(|| EngineError::NotFound("Category not found".to_string()))
}

/// Resolve an optional credit card reference.
///
/// An absent id yields `None` without any lookup; a present id that matches
/// no card is an error.
pub(super) async fn resolve_credit_card<C: ConnectionTrait>(
    conn: &C,
    credit_card_id: Option<i64>,
) -> ResultEngine<Option<credit_cards::Model>> {
    match credit_card_id {
        None => Ok(None),
        Some(id) => credit_cards::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(Some)
            .ok_or_else(|| EngineError::NotFound("CreditCard not found".to_string())),
    }
}

/// Resolve an optional account reference. Same contract as credit cards.
pub(super) async fn resolve_account<C: ConnectionTrait>(
    conn: &C,
    account_id: Option<i64>,
) -> ResultEngine<Option<accounts::Model>> {
    match account_id {
        None => Ok(None),
        Some(id) => accounts::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(Some)
            .ok_or_else(|| EngineError::NotFound("Account not found".to_string())),
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
