//! Rendering of [`ResponseEnvelope`] as an HTTP response.

use axum::http::header::{HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use lexbridge_types::envelope::ResponseEnvelope;

/// Newtype so the envelope can be returned from axum handlers.
#[derive(Debug)]
pub struct EnvelopeResponse(pub ResponseEnvelope);

impl IntoResponse for EnvelopeResponse {
    fn into_response(self) -> Response {
        let ResponseEnvelope {
            status_code,
            headers,
            body,
        } = self.0;

        let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, body).into_response();

        let response_headers = response.headers_mut();
        for (name, value) in headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    response_headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid envelope header"),
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_status_and_headers() {
        let response = EnvelopeResponse(ResponseEnvelope::error(400, "Message field is required"))
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
