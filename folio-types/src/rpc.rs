//! JSON envelope of the `project.*` remote procedures.
//!
//! Queries are `GET /api/trpc/<procedure>?input=<json>`, mutations are
//! `POST /api/trpc/<procedure>` with the input as the JSON body. Success
//! bodies wrap the output as `{"result":{"data":..}}`, failures as
//! `{"error":{"code":..,"message":..}}`.

use serde::{Deserialize, Serialize};

use crate::ValidationErrors;

/// Path prefix the procedures are mounted under.
pub const RPC_PATH: &str = "/api/trpc";

pub const GET_PROJECT_BY_SLUG: &str = "project.getProjectBySlug";
pub const UPDATE_PROJECT: &str = "project.updateProject";
pub const LIST_PROJECTS: &str = "project.listProjects";

/// Input of `project.getProjectBySlug`.
///
/// The slug is kept as plain text: a malformed slug simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugInput {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcResponse<T> {
    pub result: RpcResult<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcResult<T> {
    pub data: T,
}

impl<T> RpcResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            result: RpcResult { data },
        }
    }

    pub fn into_data(self) -> T {
        self.result.data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcErrorCode {
    BadRequest,
    NotFound,
    InternalServerError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorResponse {
    pub error: RpcError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcError {
    pub code: RpcErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<ValidationErrors>,
}

impl RpcErrorResponse {
    pub fn new(code: RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: RpcError {
                code,
                message: message.into(),
                field_errors: None,
            },
        }
    }

    pub fn with_field_errors(mut self, errors: ValidationErrors) -> Self {
        self.error.field_errors = Some(errors);
        self
    }
}
