use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Amount, Engine, EngineError, ResultEngine, Transaction, TransactionNew, transactions};

fn not_found() -> EngineError {
    EngineError::KeyNotFound("Transaction not found".to_string())
}

impl Engine {
    /// List entries, newest first.
    ///
    /// Entries created at the same instant come back in whatever order the
    /// database returns them.
    pub async fn list_transactions(&self, user_id: Option<i64>) -> ResultEngine<Vec<Transaction>> {
        let mut query = transactions::Entity::find();
        if let Some(user_id) = user_id {
            query = query.filter(transactions::Column::UserId.eq(user_id));
        }

        let models = query
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Transaction::from).collect())
    }

    /// Add an entry and return it with its assigned id.
    pub async fn new_transaction(&self, tx: TransactionNew) -> ResultEngine<Transaction> {
        let model = tx
            .into_active_model(Utc::now())
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }

    /// Replace the amount of an entry. Nothing else about it changes.
    ///
    /// The write and the read of the stored row share one database
    /// transaction, so a concurrent delete cannot slip between them.
    pub async fn update_transaction_amount(
        &self,
        id: i64,
        amount: Amount,
    ) -> ResultEngine<Transaction> {
        let db_tx = self.database.begin().await?;
        let model = transactions::ActiveModel {
            id: ActiveValue::Unchanged(id),
            amount: ActiveValue::Set(amount.to_string()),
            ..Default::default()
        }
        .update(&db_tx)
        .await
        .map_err(|err| match err {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => not_found(),
            err => err.into(),
        })?;
        db_tx.commit().await?;
        Ok(model.into())
    }

    /// Delete an entry.
    pub async fn delete_transaction(&self, id: i64) -> ResultEngine<()> {
        let result = transactions::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
