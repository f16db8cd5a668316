use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::{FromRequest, debug_handler};
use utoipa::OpenApi;

use std::{any::Any, backtrace::Backtrace, sync::Arc};

use crate::{
    dto::{CreateNoteRequest, MessageResponse, NoteEnvelope, NoteResponse, UpdateNoteRequest},
    service::{NoteError, NoteService},
};

#[derive(OpenApi)]
#[openapi(
    paths(root, get_all_notes, create_note, update_note, delete_note),
    components(schemas(
        NoteResponse,
        NoteEnvelope,
        MessageResponse,
        CreateNoteRequest,
        UpdateNoteRequest
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

/// JSON body extractor whose rejections render as `{"message": ...}` with 400.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(BodyRejection))]
pub struct JsonBody<T>(pub T);

pub struct BodyRejection(JsonRejection);

impl From<JsonRejection> for BodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection)
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        tracing::debug!("rejected request body: {}", self.0.body_text());
        message(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", self.0.body_text()),
        )
    }
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
        .into_response()
}

/// Maps a service failure to its status code. `storage_message` is what the
/// client sees for a storage fault; the detail only goes to the log.
fn failure(error: &NoteError, storage_message: &str) -> Response {
    match error {
        NoteError::Validation(e) => {
            tracing::debug!("rejected note: {e}");
            message(StatusCode::BAD_REQUEST, e.to_string())
        }
        NoteError::NotFound(_) => message(StatusCode::NOT_FOUND, "Note not found"),
        NoteError::Storage(e) => {
            tracing::error!("{storage_message}: {e}");
            message(StatusCode::INTERNAL_SERVER_ERROR, storage_message)
        }
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    )
)]
pub async fn root() -> Response {
    (StatusCode::OK, "Welcome to Notes API").into_response()
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "All notes, newest first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => failure(&e, "Server error while fetching notes"),
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteEnvelope),
        (status = 400, description = "Title is missing or the body is malformed", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    JsonBody(payload): JsonBody<CreateNoteRequest>,
) -> Response {
    match service.create_note(payload).await {
        Ok(note) => (
            StatusCode::CREATED,
            Json(NoteEnvelope {
                message: "Note created successfully".to_string(),
                note,
            }),
        )
            .into_response(),
        Err(e) => failure(&e, "Error creating note"),
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteEnvelope),
        (status = 400, description = "Title is empty or the body is malformed", body = MessageResponse),
        (status = 404, description = "Note not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateNoteRequest>,
) -> Response {
    match service.update_note(&id, payload).await {
        Ok(note) => (
            StatusCode::OK,
            Json(NoteEnvelope {
                message: "Note updated successfully".to_string(),
                note,
            }),
        )
            .into_response(),
        Err(e) => failure(&e, "Error updating note"),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 404, description = "Note not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Response {
    match service.delete_note(&id).await {
        Ok(()) => message(StatusCode::OK, "Note deleted successfully"),
        Err(e) => failure(&e, "Error deleting note"),
    }
}

pub async fn route_not_found() -> Response {
    message(StatusCode::NOT_FOUND, "Route not found")
}

/// Last resort for a handler that panicked.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err.downcast_ref::<String>().map_or_else(
        || err.downcast_ref::<&str>().map_or("no error details", |s| s),
        String::as_str,
    );

    tracing::error!(
        "Unhandled error while serving request: {details}\n{}",
        Backtrace::capture()
    );

    message(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong on the server",
    )
}
