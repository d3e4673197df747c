use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use path_mapping::MappingError;
use schema_tree::TreeError;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::CatalogError;

/// Error response returned by every catalog endpoint.
///
/// ```json
/// { "ok": false, "error": { "code": "<code>", "message": "<message>" } }
/// ```
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub ok: bool,
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorResponse {
                ok: false,
                error: ApiErrorBody {
                    code: code.into(),
                    message: message.into(),
                },
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<TreeError> for ApiError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::PathNotFound(_) => Self::not_found(err.to_string()),
            TreeError::NotAFolder(_) => Self::bad_request(err.to_string()),
        }
    }
}

impl From<MappingError> for ApiError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::InvalidMapping(_) => Self::bad_request(err.to_string()),
            MappingError::MappingNotFound(_) => Self::not_found(err.to_string()),
            MappingError::DuplicateId(_) | MappingError::DuplicateCanonicalPath(_) => {
                Self::conflict(err.to_string())
            }
            MappingError::Persistence(_) | MappingError::Serialization(_) => {
                tracing::error!("mapping storage failure: {err}");
                Self::internal(err.to_string())
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Tree(err) => err.into(),
            CatalogError::Mapping(err) => err.into(),
            CatalogError::Config(msg) | CatalogError::Io(msg) => Self::internal(msg),
        }
    }
}
