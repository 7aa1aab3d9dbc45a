use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method, Response};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use shared::history::SpinRecord;

mod error;
mod history;
mod logging;

#[derive(Clone)]
pub struct AppState {
    /// Append-only spin history. Process-lifetime only: gone on restart.
    history: Arc<tokio::sync::Mutex<Vec<SpinRecord>>>,
}

pub async fn health_check() -> impl IntoResponse {
    Response::builder().status(200).body(Body::from("OK")).unwrap()
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(vec![
            "http://127.0.0.1:8080".parse::<HeaderValue>().unwrap(),
            "http://localhost:8080".parse::<HeaderValue>().unwrap(),
        ])
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec![HeaderName::from_static("content-type")]);

    Router::new()
        .route("/health_check", get(health_check))
        .merge(history::create_router())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::setup();

    let state = AppState {
        history: Arc::new(tokio::sync::Mutex::new(Vec::new())),
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app(state)).await.unwrap();
}
