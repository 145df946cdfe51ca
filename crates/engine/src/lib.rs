pub use accounts::{Account, AccountDetail};
pub use categories::Category;
pub use credit_cards::{CreditCard, CreditCardDetail};
pub use error::EngineError;
pub use movements::{Movement, MovementDraft, MovementKind};
pub use ops::{CreditCardFields, Engine, EngineBuilder};
pub use users::{User, UserDetail, UserSummary};

mod accounts;
mod categories;
mod credit_cards;
mod error;
mod movements;
mod ops;
mod users;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
