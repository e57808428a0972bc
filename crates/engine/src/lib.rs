//! Account, session and budget-entry services.
//!
//! [`Engine`] owns the database pool and the password hasher and exposes one
//! async method per operation of the HTTP surface. It keeps no state between
//! calls: everything lives in the database.

use sea_orm::DatabaseConnection;

pub use accounts::{AccountNew, Login};
pub use credentials::{DEFAULT_HASH_COST, Hasher};
pub use error::EngineError;
pub use money::Amount;
pub use transactions::{DEFAULT_USER_ID, Transaction, TransactionNew};

mod accounts;
mod credentials;
mod error;
mod money;
mod ops;
mod sessions;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    hasher: Hasher,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    hasher: Hasher,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the bcrypt work factor (defaults to [`DEFAULT_HASH_COST`]).
    pub fn hash_cost(mut self, cost: u32) -> EngineBuilder {
        self.hasher = Hasher::new(cost);
        self
    }

    /// Construct `Engine`, checking that the database answers.
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;
        Ok(Engine {
            database: self.database,
            hasher: self.hasher,
        })
    }
}
