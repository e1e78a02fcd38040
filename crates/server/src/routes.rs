pub mod cars;

use axum::{
    routing::{any, get},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> ApiError {
    ApiError::not_found("not found")
}

/// `/cars` and `/cars/{id}`. The item route captures the whole remainder so
/// trailing slashes and extra segments reach the id check instead of the
/// router's 404. Wildcards never match an empty segment, hence `/cars/`.
fn car_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/cars",
            get(cars::list_cars)
                .post(cars::create_car)
                .fallback(cars::method_not_allowed),
        )
        .route(
            "/cars/*id",
            get(cars::get_car)
                .put(cars::update_car)
                .delete(cars::delete_car)
                .fallback(cars::item_method_not_allowed),
        )
        .route("/cars/", any(cars::missing_id))
}

/// Build the full application router: health, API docs, and the car routes
/// served both at the root and under `/api`.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(car_routes())
        .nest("/api", car_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
