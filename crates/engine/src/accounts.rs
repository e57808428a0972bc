//! Accounts table.
//!
//! `username` carries a unique index; the numeric `id` is only used as the
//! owner reference of budget entries.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    /// bcrypt digest, never the plaintext.
    pub password: String,
    pub fname: String,
    pub lname: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A registration request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountNew {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl AccountNew {
    /// Returns `true` when every field holds some text.
    pub(crate) fn is_complete(&self) -> bool {
        [
            &self.username,
            &self.password,
            &self.first_name,
            &self.last_name,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }
}

/// Result of a login attempt.
///
/// `Rejected` covers both an unknown username and a wrong password so that
/// callers cannot tell them apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Login {
    Granted { token: String },
    MissingCredentials,
    Rejected,
}
