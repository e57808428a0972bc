//! Budget entry endpoints

use api_types::transaction::{
    TransactionDelete, TransactionDeleted, TransactionListResponse, TransactionNew,
    TransactionQuery, TransactionSaved, TransactionUpdate, TransactionView,
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{Envelope, Reply, ServerError, input, server::ServerState};

fn view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        description: tx.description,
        amount: tx.amount,
        kind: tx.kind,
    }
}

/// `GET /get-transactions[?userId=<id>]`
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<TransactionQuery>, QueryRejection>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    const FAILED: &str = "Server error while fetching transactions";

    let Query(query) = query.map_err(|err| ServerError::rejected(Envelope::Error, err))?;
    let user_id = input::owner_filter(query.user_id.as_deref()).or_reply(Envelope::Error, FAILED)?;

    let transactions = state
        .engine
        .list_transactions(user_id)
        .await
        .or_reply(Envelope::Error, FAILED)?
        .into_iter()
        .map(view)
        .collect();

    Ok(Json(TransactionListResponse { transactions }))
}

/// `POST /add-transaction`
pub async fn new(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionSaved>), ServerError> {
    const FAILED: &str = "Server error while adding transaction";

    let Json(payload) = payload.map_err(|err| ServerError::rejected(Envelope::Success, err))?;
    let tx = input::transaction_new(payload).or_reply(Envelope::Success, FAILED)?;

    let tx = state
        .engine
        .new_transaction(tx)
        .await
        .or_reply(Envelope::Success, FAILED)?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionSaved {
            success: true,
            transaction: view(tx),
        }),
    ))
}

/// `POST /update-transaction`
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionUpdate>, JsonRejection>,
) -> Result<Json<TransactionSaved>, ServerError> {
    const FAILED: &str = "Server error while updating transaction";

    let Json(payload) = payload.map_err(|err| ServerError::rejected(Envelope::Success, err))?;
    let (id, amount) = input::transaction_update(payload).or_reply(Envelope::Success, FAILED)?;

    let tx = state
        .engine
        .update_transaction_amount(id, amount)
        .await
        .or_reply(Envelope::Success, FAILED)?;

    Ok(Json(TransactionSaved {
        success: true,
        transaction: view(tx),
    }))
}

/// `POST /delete-transaction`
pub async fn delete(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionDelete>, JsonRejection>,
) -> Result<Json<TransactionDeleted>, ServerError> {
    const FAILED: &str = "Server error while deleting transaction";

    let Json(payload) = payload.map_err(|err| ServerError::rejected(Envelope::Success, err))?;
    let id = input::transaction_id(payload.transaction_id, "Transaction ID is required")
        .or_reply(Envelope::Success, FAILED)?;

    state
        .engine
        .delete_transaction(id)
        .await
        .or_reply(Envelope::Success, FAILED)?;

    Ok(Json(TransactionDeleted { success: true }))
}
