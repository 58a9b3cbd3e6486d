//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` [`Error`] whose details name the
//! offending field and a stable code, e.g.
//! `{"field": "id", "code": "invalid_id", "value": "42"}`.

use serde_json::{Value, json};

use crate::domain::{
    CredentialsValidationError, Email, Error, Fields, RecordId, SupplyValidationError, into_fields,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidEmail,
    InvalidValue,
    NotAnObject,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::NotAnObject => "not_an_object",
        }
    }
}

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: &str,
    code: ErrorCode,
    value: &str,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
        "value": value,
    }))
}

/// Parse a record id path segment.
pub(crate) fn parse_record_id(raw: &str) -> Result<RecordId, Error> {
    RecordId::new(raw).map_err(|err| {
        field_value_error("id", ErrorCode::InvalidId, raw, format!("id is invalid: {err}"))
    })
}

/// Parse an email path segment.
pub(crate) fn parse_email(raw: &str) -> Result<Email, Error> {
    Email::new(raw)
        .map_err(|err| field_value_error("email", ErrorCode::InvalidEmail, raw, err.to_string()))
}

/// Require a free-form body to be a JSON object.
pub(crate) fn object_body(body: Value) -> Result<Fields, Error> {
    into_fields(body).ok_or_else(|| {
        field_error(
            "body",
            ErrorCode::NotAnObject,
            "Request body must be a JSON object",
        )
    })
}

pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    field_error(err.field(), ErrorCode::InvalidValue, err.to_string())
}

pub(crate) fn supply_error(err: SupplyValidationError) -> Error {
    field_error(err.field(), ErrorCode::InvalidValue, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("42")]
    #[case("65a1f0c2b3d4e5f60718293z")]
    fn malformed_ids_name_the_id_field(#[case] raw: &str) {
        let err = parse_record_id(raw).expect_err("malformed id");

        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "id");
        assert_eq!(details["code"], "invalid_id");
    }

    #[rstest]
    fn well_formed_ids_parse() {
        let id = parse_record_id("65A1F0C2B3D4E5F60718293A").expect("valid id");
        assert_eq!(id.as_ref(), "65a1f0c2b3d4e5f60718293a");
    }

    #[rstest]
    #[case(json!([1, 2]))]
    #[case(json!("text"))]
    #[case(Value::Null)]
    fn free_form_bodies_must_be_objects(#[case] body: Value) {
        let err = object_body(body).expect_err("not an object");
        assert_eq!(err.details().expect("details")["code"], "not_an_object");
    }

    #[rstest]
    fn object_bodies_drop_client_ids() {
        let fields = object_body(json!({ "_id": "x", "name": "Ada" })).expect("object");
        assert!(!fields.contains_key("_id"));
        assert_eq!(fields["name"], "Ada");
    }

    #[rstest]
    fn credential_errors_name_their_field() {
        let err = credentials_error(CredentialsValidationError::EmptyPassword);
        assert_eq!(err.details().expect("details")["field"], "password");
        assert_eq!(err.message(), "password must not be empty");
    }
}
