//! Parsing of path and query parameters into domain values.
//!
//! Category failures become `invalid_request` errors whose details name the
//! offending field. A path id that is not a UUID names no stored work, so it
//! is reported as `not_found` like any other unknown id.

use serde_json::json;

use crate::domain::{Category, Error, WorkId};

/// Validation codes for request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamCode {
    MissingField,
    UnknownCategory,
}

impl ParamCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::UnknownCategory => "unknown_category",
        }
    }
}

fn param_error(field: &str, value: &str, code: ParamCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    }))
}

/// Raised when a required query parameter is absent.
pub(crate) fn missing_param_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required parameter: {field}")).with_details(json!({
        "field": field,
        "code": ParamCode::MissingField.as_str(),
    }))
}

/// Parse a work id taken from the request path.
pub(crate) fn parse_work_id(raw: &str) -> Result<WorkId, Error> {
    raw.parse::<WorkId>().map_err(|_| Error::not_found(format!("work {raw} not found")))
}

/// Parse a category taken from the path or query string.
pub(crate) fn parse_category(raw: &str) -> Result<Category, Error> {
    raw.parse::<Category>().map_err(|_| {
        param_error(
            "category",
            raw,
            ParamCode::UnknownCategory,
            "category must be one of book, album, movie".to_owned(),
        )
    })
}
