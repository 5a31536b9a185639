//! Development server answering the account API from an in-memory store.
//! Activation and reset keys are logged at `info` since no mail is sent.

mod handlers;
mod openapi;
pub mod store;

pub use openapi::ApiDoc;
pub use store::UserStore;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, Request,
    },
    response::Json,
    routing::{get, post},
    Router,
};
use handlers::{account, authenticate, health};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::OpenApi;

/// Mock API routes over the given store.
pub fn router(store: Arc<UserStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/authenticate", post(authenticate::authenticate))
        .route(
            "/account",
            get(account::get_account).post(account::save_account),
        )
        .route("/register", post(account::register))
        .route("/activate", get(account::activate))
        .route("/account/change-password", post(account::change_password))
        .route(
            "/account/reset-password/init",
            post(account::reset_password_init),
        )
        .route(
            "/account/reset-password/finish",
            post(account::reset_password_finish),
        )
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(store)),
        )
}

/// Serves the mock API on an already bound listener until the future is dropped.
///
/// # Errors
/// Returns an error if the server stops unexpectedly.
pub async fn serve(listener: TcpListener, store: Arc<UserStore>) -> Result<()> {
    axum::serve(listener, router(store).into_make_service())
        .await
        .context("Mock server failed")
}

/// Binds the port and serves a freshly seeded store until Ctrl-C.
///
/// # Errors
/// Returns an error if the port cannot be bound or the server fails.
pub async fn new(port: u16) -> Result<()> {
    let store = Arc::new(UserStore::seeded());
    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Mock API listening on [::]:{}", port);

    axum::serve(listener, router(store).into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, request_id)
}
