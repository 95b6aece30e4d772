use folio_types::{rpc::RpcErrorCode, ValidationErrors};
use thiserror::Error;

/// A read that did not produce an answer. "No such project" is not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server answered {code:?}: {message}")]
    Rejected { code: RpcErrorCode, message: String },
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
}

/// An update the server did not apply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("project not found: {0}")]
    NotFound(String),
    #[error("update rejected ({code:?}): {message}")]
    Rejected {
        code: RpcErrorCode,
        message: String,
        field_errors: Option<ValidationErrors>,
    },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
}

/// Outcome of one failed call, before it is attributed to a query or a mutation.
#[derive(Debug)]
pub(crate) enum CallError {
    Transport(String),
    Status {
        status: u16,
        error: Option<folio_types::rpc::RpcError>,
    },
    Malformed(String),
}

impl CallError {
    fn code_and_message(
        status: u16,
        error: Option<folio_types::rpc::RpcError>,
    ) -> (RpcErrorCode, String, Option<ValidationErrors>) {
        match error {
            Some(error) => (error.code, error.message, error.field_errors),
            None => {
                let code = if (400..500).contains(&status) {
                    RpcErrorCode::BadRequest
                } else {
                    RpcErrorCode::InternalServerError
                };
                (code, format!("HTTP {status}"), None)
            }
        }
    }
}

impl From<CallError> for QueryError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Transport(e) => Self::Transport(e),
            CallError::Malformed(e) => Self::MalformedResponse(e),
            CallError::Status { status, error } => {
                let (code, message, _) = CallError::code_and_message(status, error);
                Self::Rejected { code, message }
            }
        }
    }
}

impl From<CallError> for MutationError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Transport(e) => Self::Transport(e),
            CallError::Malformed(e) => Self::MalformedResponse(e),
            CallError::Status { status, error } => {
                let (code, message, field_errors) = CallError::code_and_message(status, error);
                if code == RpcErrorCode::NotFound {
                    Self::NotFound(message)
                } else {
                    Self::Rejected {
                        code,
                        message,
                        field_errors,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_types::{rpc::RpcError, ProjectField};

    use super::*;

    #[test]
    fn not_found_code_becomes_not_found() {
        let err = MutationError::from(CallError::Status {
            status: 404,
            error: Some(RpcError {
                code: RpcErrorCode::NotFound,
                message: "project not found: acme-hq".to_string(),
                field_errors: None,
            }),
        });

        assert!(matches!(err, MutationError::NotFound(_)));
    }

    #[test]
    fn field_errors_are_kept_on_rejection() {
        let mut errors = ValidationErrors::new();
        errors.add(ProjectField::Place, "Place is required");

        let err = MutationError::from(CallError::Status {
            status: 400,
            error: Some(RpcError {
                code: RpcErrorCode::BadRequest,
                message: "invalid project".to_string(),
                field_errors: Some(errors.clone()),
            }),
        });

        assert_eq!(
            err,
            MutationError::Rejected {
                code: RpcErrorCode::BadRequest,
                message: "invalid project".to_string(),
                field_errors: Some(errors),
            }
        );
    }

    #[test]
    fn status_without_envelope_is_classified_by_status() {
        let err = QueryError::from(CallError::Status {
            status: 502,
            error: None,
        });

        assert_eq!(
            err,
            QueryError::Rejected {
                code: RpcErrorCode::InternalServerError,
                message: "HTTP 502".to_string(),
            }
        );
    }
}
