//! Budget entries.
//!
//! Entries live in the `budget` table. The `category` column is what clients
//! call the description of the entry.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::Amount;

/// Owner used when a client does not say who the entry belongs to.
pub const DEFAULT_USER_ID: i64 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    /// Always two decimal places, e.g. `"4.50"`.
    pub amount: String,
    /// Free text such as `income` or `expense`.
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Input of [`Engine::new_transaction`](crate::Engine::new_transaction).
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionNew {
    pub user_id: Option<i64>,
    pub description: String,
    pub amount: Amount,
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "budget")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub amount: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TransactionNew {
    pub(crate) fn into_active_model(self, created_at: DateTime<Utc>) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id.unwrap_or(DEFAULT_USER_ID)),
            category: ActiveValue::Set(self.description),
            amount: ActiveValue::Set(self.amount.to_string()),
            kind: ActiveValue::Set(self.kind),
            created_at: ActiveValue::Set(created_at),
        }
    }
}

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            description: model.category,
            amount: model.amount,
            kind: model.kind,
            created_at: model.created_at,
        }
    }
}
