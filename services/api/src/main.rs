mod classify;
mod error;
mod rating;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use premia_common::types::ServiceInfo;
use premia_config::{init_tracing, AppConfig};
use premia_db::rating::pg_repository::PgRatingRepository;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

use crate::classify::client::{VisionClient, VisionConfig};

#[derive(Clone)]
pub struct AppState {
    pub rating_repo: PgRatingRepository,
    pub vision: VisionClient,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("premia-api"))
}

async fn metrics() -> impl IntoResponse {
    let body = "\
# HELP premia_up Service up indicator\n\
# TYPE premia_up gauge\n\
premia_up 1\n\
# HELP premia_info Service info\n\
# TYPE premia_info gauge\n\
premia_info{service=\"premia-api\",version=\"0.1.0\"} 1\n";

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse::<HeaderValue>().unwrap(),
            "http://127.0.0.1:3000".parse::<HeaderValue>().unwrap(),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/metrics", get(metrics))
        .merge(classify::router())
        .merge(rating::router())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AppConfig::from_env().expect("failed to load config");
    tracing::info!(service = "premia-api", "starting");

    let pool = premia_db::create_pool(&config.database_url)
        .await
        .expect("failed to create database pool");

    let vision_config = VisionConfig::from_env().expect("failed to load classifier config");
    let vision = VisionClient::new(vision_config).expect("failed to create classifier client");

    let state = AppState {
        rating_repo: PgRatingRepository::new(pool),
        vision,
    };

    let app = build_router(state);
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
