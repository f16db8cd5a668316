pub mod config;
pub mod dto;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use handlers::rest;
use service::NoteService;

/// Builds the HTTP router with all routes and middleware.
pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(rest::root))
        .route("/notes", get(rest::get_all_notes).post(rest::create_note))
        .route("/notes/{id}", put(rest::update_note).delete(rest::delete_note))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()),
        )
        .fallback(rest::route_not_found)
        .with_state(service)
        .layer(CatchPanicLayer::custom(rest::handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
