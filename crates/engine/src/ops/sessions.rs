use chrono::Utc;
use sea_orm::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{Engine, ResultEngine, sessions};

impl Engine {
    /// Open a session for `username` and return its token.
    pub(crate) async fn open_session(&self, username: &str) -> ResultEngine<String> {
        let token = Uuid::new_v4().to_string();
        let model = sessions::ActiveModel {
            token: ActiveValue::Set(token.clone()),
            username: ActiveValue::Set(username.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        };
        sessions::Entity::insert(model)
            .exec_without_returning(&self.database)
            .await?;
        Ok(token)
    }

    /// Close the session identified by `token`.
    ///
    /// Returns `false` when no such session was open. That is not an error:
    /// closing a session twice has the same effect as closing it once.
    pub async fn close_session(&self, token: &str) -> ResultEngine<bool> {
        let result = sessions::Entity::delete_by_id(token.to_string())
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
