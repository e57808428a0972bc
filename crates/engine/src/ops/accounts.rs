use sea_orm::{ActiveValue, QueryFilter, SqlErr, prelude::*};

use crate::{AccountNew, Engine, EngineError, Login, ResultEngine, accounts};

fn existing_username() -> EngineError {
    EngineError::ExistingKey("Username already exists".to_string())
}

impl Engine {
    /// Register a new account.
    ///
    /// The existence check spares a bcrypt round for obvious duplicates; the
    /// unique index on `username` settles concurrent registrations.
    pub async fn register(&self, account: AccountNew) -> ResultEngine<()> {
        if !account.is_complete() {
            return Err(EngineError::MissingField(
                "All fields are required".to_string(),
            ));
        }

        let AccountNew {
            username,
            password,
            first_name,
            last_name,
        } = account;

        if self.find_account(&username).await?.is_some() {
            return Err(existing_username());
        }

        let digest = self.hasher.hash(password).await?;
        let model = accounts::ActiveModel {
            id: ActiveValue::NotSet,
            username: ActiveValue::Set(username.clone()),
            password: ActiveValue::Set(digest),
            fname: ActiveValue::Set(first_name),
            lname: ActiveValue::Set(last_name),
        };

        match accounts::Entity::insert(model).exec(&self.database).await {
            Ok(_) => {
                tracing::info!(%username, "account registered");
                Ok(())
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::warn!(%username, "username taken by a concurrent registration");
                Err(existing_username())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Check a username/password pair and open a session when it matches.
    pub async fn login(&self, username: &str, password: &str) -> ResultEngine<Login> {
        if username.is_empty() || password.is_empty() {
            return Ok(Login::MissingCredentials);
        }

        let Some(account) = self.find_account(username).await? else {
            tracing::warn!(%username, "login rejected: unknown username");
            return Ok(Login::Rejected);
        };

        if !self
            .hasher
            .verify(password.to_string(), account.password)
            .await?
        {
            tracing::warn!(%username, "login rejected: password mismatch");
            return Ok(Login::Rejected);
        }

        let token = self.open_session(&account.username).await?;
        Ok(Login::Granted { token })
    }

    async fn find_account(&self, username: &str) -> ResultEngine<Option<accounts::Model>> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.database)
            .await?;
        Ok(account)
    }
}
