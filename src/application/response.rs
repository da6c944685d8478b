// src/application/response.rs
//
// Response envelope
//
// ARCHITECTURE:
// - Every endpoint answers with the same `{code, message, data}` shape
// - code 0 is success; anything else is an ErrorMessage code
// - Failures carry their structured details in `data`, or null

use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, ErrorMessage, ModuleResult};

/// Code and message of a successful response
pub const OK_CODE: u32 = 0;
pub const OK_MESSAGE: &str = "ok";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub code: u32,
    pub message: String,
    pub data: Value,
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            code: OK_CODE,
            message: OK_MESSAGE.to_string(),
            data,
        }
    }

    pub fn error(error: &ErrorMessage) -> Self {
        Self {
            code: error.code(),
            message: error.message().to_string(),
            data: error.details().cloned().unwrap_or(Value::Null),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == OK_CODE
    }
}

/// Wrap a projected result into the envelope
pub fn api_response<T: Serialize>(result: ModuleResult<T>) -> ApiResponse {
    match result {
        Ok(payload) => match serde_json::to_value(payload) {
            Ok(data) => ApiResponse::ok(data),
            Err(e) => ApiResponse::error(&ErrorMessage::from(AppError::Serialization(e))),
        },
        Err(error) => ApiResponse::error(&error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::message::codes;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let response = api_response::<Vec<u32>>(Ok(vec![1, 2]));
        assert!(response.is_ok());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "code": 0, "message": "ok", "data": [1, 2] })
        );
    }

    #[test]
    fn test_error_envelope_without_details() {
        let response = api_response::<()>(Err(ErrorMessage::unrecognized_request()));
        assert_eq!(response.code, codes::UNRECOGNIZED_REQUEST);
        assert_eq!(response.message, "request not recognized");
        assert!(response.data.is_null());
    }

    #[test]
    fn test_error_envelope_carries_details() {
        let details = json!({ "fields": { "title": [] } });
        let response = api_response::<()>(Err(ErrorMessage::with_details(
            codes::VALIDATION_FAILED,
            details.clone(),
        )));
        assert_eq!(response.code, codes::VALIDATION_FAILED);
        assert_eq!(response.data, details);
    }
}
