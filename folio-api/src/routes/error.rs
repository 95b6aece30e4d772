use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_types::{
    rpc::{RpcErrorCode, RpcErrorResponse},
    ValidationErrors,
};

use crate::domain::ProjectError;

/// An RPC failure, rendered as `{"error":{"code":..,"message":..}}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: RpcErrorCode,
    message: String,
    field_errors: Option<ValidationErrors>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            field_errors: None,
        }
    }

    pub fn with_field_errors(mut self, errors: ValidationErrors) -> Self {
        self.field_errors = Some(errors);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            RpcErrorCode::InternalServerError,
            message,
        )
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, RpcErrorCode::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, RpcErrorCode::NotFound, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = RpcErrorResponse::new(self.code, self.message);
        if let Some(errors) = self.field_errors {
            body = body.with_field_errors(errors);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(_) => Self::not_found(err.to_string()),
            ProjectError::Invalid(errors) => {
                Self::bad_request("invalid project").with_field_errors(errors)
            }
            ProjectError::InvalidThumbnail(_) => Self::bad_request(err.to_string()),
            ProjectError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                Self::internal("internal server error")
            }
        }
    }
}
