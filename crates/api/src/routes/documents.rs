//! Document management routes.
//!
//! Upload is multipart: metadata fields plus one file. The file's extension
//! is checked before anything is written, so a rejected upload leaves no row
//! and no file behind.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::routes::{internal_error, json_error};
use crate::AppState;
use adboard_core::storage::{StorageService, file_extension, sanitize_filename};
use adboard_db::entities::documents;
use adboard_db::repositories::{
    CreateDocumentInput, DocumentError, DocumentFilter, DocumentRepository,
};

/// Creates the documents router (requires the auth layer applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents).post(upload_document))
        .route("/documents/{id}", get(get_document).delete(delete_document))
        .route("/documents/{id}/download", get(download_document))
}

/// Query filters for the document listing.
#[derive(Debug, Deserialize)]
pub struct DocumentListQuery {
    /// Exact match on project.
    pub project_id: Option<i32>,
    /// Exact match on order.
    pub order_id: Option<i32>,
}

/// Response body for a document.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    /// Document id.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Stored filename.
    pub filename: String,
    /// Document category.
    pub file_type: Option<String>,
    /// Project reference.
    pub project_id: Option<i32>,
    /// Order reference.
    pub order_id: Option<i32>,
    /// Free-text description.
    pub description: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<documents::Model> for DocumentResponse {
    fn from(model: documents::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            filename: model.filename,
            file_type: model.file_type,
            project_id: model.project_id,
            order_id: model.order_id,
            description: model.description,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Collected multipart fields of an upload.
#[derive(Debug, Default)]
struct UploadForm {
    name: Option<String>,
    file_type: Option<String>,
    project_id: Option<i32>,
    order_id: Option<i32>,
    description: Option<String>,
    file: Option<(String, Vec<u8>)>,
}

/// Download content type for a stored filename.
fn content_type_for(filename: &str) -> &'static str {
    match file_extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

fn map_error(e: &DocumentError) -> Response {
    match e {
        DocumentError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Document not found")
        }
        DocumentError::ProjectNotFound(_) | DocumentError::OrderNotFound(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_selection", &e.to_string())
        }
        DocumentError::Database(_) => {
            error!(error = %e, "Document operation failed");
            internal_error()
        }
    }
}

/// Drains the multipart stream into an `UploadForm`.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, Response> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_multipart",
            &format!("Malformed multipart body: {e}"),
        )
    })? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "file_type" => form.file_type = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "project_id" => form.project_id = Some(read_int(field).await?),
            "order_id" => form.order_id = Some(read_int(field).await?),
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| {
                    json_error(
                        StatusCode::BAD_REQUEST,
                        "invalid_multipart",
                        &format!("Failed to read file: {e}"),
                    )
                })?;
                form.file = Some((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, Response> {
    field.text().await.map_err(|e| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_multipart",
            &format!("Malformed field: {e}"),
        )
    })
}

async fn read_int(field: axum::extract::multipart::Field<'_>) -> Result<i32, Response> {
    let text = read_text(field).await?;
    text.trim().parse::<i32>().map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_selection",
            "Selector must be a number",
        )
    })
}

/// GET /documents - List documents, newest first.
async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<DocumentListQuery>,
) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());
    let filter = DocumentFilter {
        project_id: query.project_id,
        order_id: query.order_id,
    };

    match repo.list(&filter).await {
        Ok(items) => {
            let items: Vec<DocumentResponse> = items.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => map_error(&e),
    }
}

/// POST /documents - Upload a file with its metadata.
async fn upload_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match read_upload_form(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let Some(name) = form.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "name_required",
            "Name must not be empty",
        );
    };
    let Some((original_filename, data)) = form.file else {
        return json_error(StatusCode::BAD_REQUEST, "file_required", "File is required");
    };

    // Reject a disallowed extension before any row or file is written.
    if StorageService::validate_filename(&original_filename).is_err() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "extension_not_allowed",
            "Allowed file types: pdf, doc, docx, jpg, jpeg, png",
        );
    }

    let filename = sanitize_filename(&original_filename);

    let repo = DocumentRepository::new((*state.db).clone());
    let input = CreateDocumentInput {
        name: name.to_string(),
        filename: filename.clone(),
        file_type: form.file_type,
        project_id: form.project_id,
        order_id: form.order_id,
        description: form.description,
    };

    let document = match repo.create(input).await {
        Ok(document) => document,
        Err(e) => return map_error(&e),
    };

    if let Err(e) = state.storage.write(&filename, data).await {
        error!(error = %e, filename = %filename, "Failed to store uploaded file");
        // Do not keep a row whose file never landed.
        if let Err(cleanup) = repo.delete(document.id).await {
            error!(error = %cleanup, "Failed to roll back document row");
        }
        return json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_error",
            "Failed to store the uploaded file",
        );
    }

    info!(document_id = document.id, filename = %filename, "Document uploaded");
    (StatusCode::CREATED, Json(DocumentResponse::from(document))).into_response()
}

/// GET /documents/{id} - Get document metadata.
async fn get_document(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(document) => (StatusCode::OK, Json(DocumentResponse::from(document))).into_response(),
        Err(e) => map_error(&e),
    }
}

/// GET /documents/{id}/download - Stream the stored file.
async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());

    let document = match repo.find_by_id(id).await {
        Ok(document) => document,
        Err(e) => return map_error(&e),
    };

    match state.storage.read(&document.filename).await {
        Ok(data) => {
            let disposition = format!("attachment; filename=\"{}\"", document.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type_for(&document.filename)),
                    (header::CONTENT_DISPOSITION, disposition.as_str()),
                ],
                data,
            )
                .into_response()
        }
        Err(adboard_core::storage::StorageError::NotFound { .. }) => json_error(
            StatusCode::NOT_FOUND,
            "file_missing",
            "Stored file is missing",
        ),
        Err(e) => {
            error!(error = %e, "Failed to read stored file");
            internal_error()
        }
    }
}

/// DELETE /documents/{id} - Delete the record and its backing file.
///
/// A file already missing on disk does not fail the delete.
async fn delete_document(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());

    let document = match repo.delete(id).await {
        Ok(document) => document,
        Err(e) => return map_error(&e),
    };

    if let Err(e) = state.storage.remove(&document.filename).await {
        warn!(error = %e, filename = %document.filename, "Failed to remove stored file");
    }

    info!(document_id = id, "Document deleted");
    StatusCode::NO_CONTENT.into_response()
}
