//! HTTP mapping for domain errors.
//!
//! Domain [`Error`] values become JSON bodies of the form
//! `{"success": false, "code", "message", "traceId"?, "details"?}` with a
//! status derived from the error code. Internal failures are logged here and
//! redacted before they reach the client.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace internal failure detail with a generic message, keeping the
/// trace id so operators can find the logged cause.
fn public_view(error: &Error) -> Error {
    if status_for(error.code()) != StatusCode::INTERNAL_SERVER_ERROR {
        return error.clone();
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = self.trace_id().map(|id| id.to_string());
        if status.is_server_error() {
            error!(
                code = ?self.code(),
                trace_id = trace_id.as_deref(),
                message = self.message(),
                "request failed"
            );
        }
        let mut builder = HttpResponse::build(status);
        if let Some(id) = trace_id {
            builder.insert_header((TRACE_ID_HEADER, id));
        }
        builder.json(public_view(self))
    }
}

/// Turn JSON body extraction failures into `400 invalid_request`.
///
/// Registered through `web::JsonConfig::error_handler` so a malformed or
/// mistyped body gets the same envelope as every other error.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejected request body");
    let error = match &err {
        JsonPayloadError::ContentType => {
            Error::invalid_request("Request body must be application/json")
        }
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            Error::invalid_request("Request body is too large")
        }
        _ => Error::invalid_request("Request body is not valid JSON for this endpoint")
            .with_details(json!({ "code": "invalid_body", "reason": err.to_string() })),
    };
    error.into()
}

/// Turn path segment extraction failures into `400 invalid_request`.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejected path parameters");
    Error::invalid_request("Invalid path parameter")
        .with_details(json!({ "code": "invalid_path", "reason": err.to_string() }))
        .into()
}
