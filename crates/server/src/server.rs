use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{accounts, categories, credit_cards, movements, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/users", post(users::create).get(users::list))
        .route(
            "/users/{id}",
            get(users::get).put(users::update).delete(users::remove),
        )
        .route("/users/{id}/summary", get(users::get_summary))
        .route("/users/email/{email}", get(users::get_by_email))
        .route("/categories", post(categories::create).get(categories::list))
        .route(
            "/categories/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route(
            "/credit-cards",
            post(credit_cards::create).get(credit_cards::list),
        )
        .route(
            "/credit-cards/{id}",
            get(credit_cards::get)
                .put(credit_cards::update)
                .delete(credit_cards::remove),
        )
        .route("/credit-cards/by-user/{user_id}", get(credit_cards::list_by_user))
        .route("/accounts", post(accounts::create).get(accounts::list))
        .route(
            "/accounts/{id}",
            get(accounts::get)
                .put(accounts::update)
                .delete(accounts::remove),
        )
        .route("/accounts/by-user/{user_id}", get(accounts::list_by_user))
        .route("/movements", post(movements::create).get(movements::list))
        .route(
            "/movements/{id}",
            get(movements::get)
                .put(movements::update)
                .delete(movements::remove),
        )
        .route("/movements/by-user/{user_id}", get(movements::list_by_user))
        .route(
            "/movements/by-user/{user_id}/by-category/{category_id}",
            get(movements::list_by_user_and_category),
        )
        .with_state(state)
}

pub async fn run(engine: Engine, bind: &str, port: u16) {
    let listener = match tokio::net::TcpListener::bind((bind, port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
