use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::{future::Future, sync::Arc};

use crate::{session, transactions, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Build the HTTP surface around `engine`.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/add-user", post(user::add_user))
        .route("/check-user", post(user::check_user))
        .route("/logout", post(session::logout))
        .route("/get-transactions", get(transactions::list))
        .route("/add-transaction", post(transactions::new))
        .route("/update-transaction", post(transactions::update))
        .route("/delete-transaction", post(transactions::delete))
        // Browsers call the API from the front-end's own origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on `listener` until `shutdown` resolves, then let in-flight
/// requests finish.
pub async fn run_with_listener<F>(
    engine: Engine,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown)
        .await
}
