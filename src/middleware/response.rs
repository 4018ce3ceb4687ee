use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::any::Any;

/// Cross-origin headers attached to every property API response
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("access-control-allow-credentials", "true"),
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET,DELETE,PATCH,POST,PUT"),
    (
        "access-control-allow-headers",
        "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version",
    ),
];

/// Insert (or overwrite) the fixed CORS header set
pub fn set_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
}

/// Response-mapping layer: also covers framework rejections (405, body limit)
/// that never reach a handler.
pub async fn attach_cors_headers(mut response: Response) -> Response {
    set_cors_headers(response.headers_mut());
    response
}

#[derive(Debug)]
enum Payload {
    Json(Vec<u8>),
    Text(String),
    Empty,
}

/// Status + body wrapper for property responses. Converting it into a
/// response always attaches the CORS header set.
#[derive(Debug)]
pub struct Envelope {
    status: StatusCode,
    payload: Payload,
}

impl Envelope {
    /// Plain-text body, used for status messages and errors
    pub fn text(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            payload: Payload::Text(message.into()),
        }
    }

    /// JSON-serialized record. A serialization failure becomes the generic 500.
    pub fn json<T: Serialize>(status: StatusCode, data: &T) -> Self {
        match serde_json::to_vec(data) {
            Ok(bytes) => Self {
                status,
                payload: Payload::Json(bytes),
            },
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                Self::text(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    crate::error::MSG_SOMETHING_WENT_WRONG,
                )
            }
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            payload: Payload::Empty,
        }
    }

    pub fn ok_json<T: Serialize>(data: &T) -> Self {
        Self::json(StatusCode::OK, data)
    }

    pub fn ok_text(message: impl Into<String>) -> Self {
        Self::text(StatusCode::OK, message)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let mut response = match self.payload {
            Payload::Json(bytes) => (
                self.status,
                [(header::CONTENT_TYPE, "application/json")],
                Body::from(bytes),
            )
                .into_response(),
            Payload::Text(text) => (
                self.status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                text,
            )
                .into_response(),
            Payload::Empty => self.status.into_response(),
        };

        set_cors_headers(response.headers_mut());
        response
    }
}

/// `CatchPanicLayer` handler: a panicking handler still answers with the
/// generic 500 envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    panic_envelope(panic, crate::error::MSG_SOMETHING_WENT_WRONG)
}

/// Same as `panic_response`, with the failure message PUT uses
pub fn update_panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    panic_envelope(panic, crate::error::MSG_UPDATE_FAILED)
}

fn panic_envelope(panic: Box<dyn Any + Send + 'static>, message: &'static str) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    Envelope::text(StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    fn assert_cors(headers: &HeaderMap) {
        for (name, value) in CORS_HEADERS {
            assert_eq!(
                headers.get(name).and_then(|v| v.to_str().ok()),
                Some(value),
                "header {} missing or wrong",
                name
            );
        }
    }

    #[tokio::test]
    async fn text_envelope_carries_headers_and_body() {
        let response = Envelope::text(StatusCode::NOT_FOUND, "Property Not Found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors(response.headers());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Property Not Found");
    }

    #[tokio::test]
    async fn json_envelope_serializes_data() {
        let response = Envelope::ok_json(&json!({"_id": "abc"})).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_cors(response.headers());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(serde_json::from_slice::<serde_json::Value>(&body).unwrap()["_id"], "abc");
    }

    #[tokio::test]
    async fn mapping_layer_overwrites_conflicting_values() {
        let mut response = StatusCode::METHOD_NOT_ALLOWED.into_response();
        response
            .headers_mut()
            .insert("access-control-allow-origin", HeaderValue::from_static("https://other"));

        let response = attach_cors_headers(response).await;
        assert_cors(response.headers());
    }

    #[tokio::test]
    async fn panic_response_is_generic_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(response.headers());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Something Went Wrong");
    }

    #[tokio::test]
    async fn update_panic_response_uses_update_message() {
        let response = update_panic_response(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(response.headers());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Failed to add property");
    }
}
