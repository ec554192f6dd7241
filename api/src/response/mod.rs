use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use util::failure::Failure;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// This struct enforces a consistent response structure across all endpoints,
/// discriminated by `success`:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "timestamp": "2025-06-01T12:00:00+00:00"
/// }
/// ```
/// or, for failures:
/// ```json
/// {
///   "success": false,
///   "error": { "message": "...", "code": "..." },
///   "timestamp": "2025-06-01T12:00:00+00:00"
/// }
/// ```
///
/// Exactly one of `data`/`error` is serialized, agreeing with `success`.
/// Constructors take the timestamp explicitly; callers read it off the
/// injected clock so tests can pin time.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub timestamp: String,
}

/// The `error` object of an error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Error envelope alias; error responses carry no payload type.
pub type ApiError = ApiResponse<()>;

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response stamped with the given instant.
    pub fn success_at(data: T, now: DateTime<Utc>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: now.to_rfc3339(),
        }
    }
}

impl ApiError {
    /// Constructs an error response stamped with the given instant.
    pub fn error_at(
        message: impl Into<String>,
        code: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                message: message.into(),
                code,
            }),
            timestamp: now.to_rfc3339(),
        }
    }
}

/// A failure reduced to the triple the envelope needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub message: String,
    pub code: String,
    pub http_status: StatusCode,
}

/// Maps a failure onto message, machine code, and HTTP status.
///
/// Total over the closed `Failure` type; classification never fails, so an
/// error envelope can always be produced.
pub fn classify(failure: &Failure) -> ClassifiedError {
    match failure {
        Failure::Domain {
            message,
            code,
            status,
        } => ClassifiedError {
            message: non_empty(message),
            code: code.clone(),
            // Out-of-range status codes fall back to 500 rather than
            // producing an unsendable response.
            http_status: StatusCode::from_u16(*status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        },
        Failure::Runtime(message) => ClassifiedError {
            message: non_empty(message),
            code: "INTERNAL_ERROR".into(),
            http_status: StatusCode::INTERNAL_SERVER_ERROR,
        },
        Failure::Text(text) => ClassifiedError {
            message: non_empty(text),
            code: "INTERNAL_ERROR".into(),
            http_status: StatusCode::INTERNAL_SERVER_ERROR,
        },
        Failure::Opaque => ClassifiedError {
            message: "An unexpected error occurred".into(),
            code: "UNKNOWN_ERROR".into(),
            http_status: StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

fn non_empty(message: &str) -> String {
    if message.is_empty() {
        "An unexpected error occurred".into()
    } else {
        message.into()
    }
}

/// Newtype letting handlers bubble `Failure` with `?`.
///
/// `IntoResponse` renders the classified triple as an error envelope with
/// the mapped status code, so no failure ever escapes unclassified.
#[derive(Debug)]
pub struct ApiFailure(pub Failure);

impl From<Failure> for ApiFailure {
    fn from(failure: Failure) -> Self {
        ApiFailure(failure)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let classified = classify(&self.0);
        tracing::error!(
            code = %classified.code,
            status = classified.http_status.as_u16(),
            "Request failed: {}",
            classified.message
        );
        let body = ApiError::error_at(
            classified.message,
            Some(classified.code),
            Utc::now(),
        );
        (classified.http_status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn success_envelope_carries_data_and_no_error() {
        let resp = ApiResponse::success_at(42, at());
        assert!(resp.success);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
        assert_eq!(json["timestamp"], "2025-06-01T12:00:00+00:00");
    }

    #[test]
    fn error_envelope_carries_error_and_no_data() {
        let resp = ApiError::error_at("boom", Some("SOME_CODE".into()), at());
        assert!(!resp.success);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["message"], "boom");
        assert_eq!(json["error"]["code"], "SOME_CODE");
    }

    #[test]
    fn error_envelope_omits_absent_code() {
        let json = serde_json::to_value(ApiError::error_at("boom", None, at())).unwrap();
        assert!(json["error"].get("code").is_none());
    }

    #[test]
    fn nullable_payload_serializes_as_explicit_null() {
        let resp = ApiResponse::<Option<u32>>::success_at(None, at());
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json["data"].is_null());
        assert!(json.as_object().unwrap().contains_key("data"));
    }

    #[test]
    fn domain_failures_keep_their_code_and_status() {
        let classified = classify(&Failure::domain("gone", "SERVICE_DOWN", 503));
        assert_eq!(classified.message, "gone");
        assert_eq!(classified.code, "SERVICE_DOWN");
        assert_eq!(classified.http_status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn runtime_and_text_failures_classify_as_internal() {
        for failure in [
            Failure::Runtime("fault".into()),
            Failure::Text("fault".into()),
        ] {
            let classified = classify(&failure);
            assert_eq!(classified.message, "fault");
            assert_eq!(classified.code, "INTERNAL_ERROR");
            assert_eq!(classified.http_status, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn opaque_failures_classify_as_unknown() {
        let classified = classify(&Failure::Opaque);
        assert_eq!(classified.message, "An unexpected error occurred");
        assert_eq!(classified.code, "UNKNOWN_ERROR");
    }

    #[test]
    fn classification_is_total_with_a_valid_status() {
        let failures = [
            Failure::domain("a", "A", 100),
            Failure::domain("b", "B", 9),
            Failure::domain("c", "C", 1000),
            Failure::Runtime(String::new()),
            Failure::Text("t".into()),
            Failure::Opaque,
        ];
        for failure in &failures {
            let classified = classify(failure);
            assert!(!classified.message.is_empty());
            let status = classified.http_status.as_u16();
            assert!((100..=599).contains(&status));
        }
    }
}
