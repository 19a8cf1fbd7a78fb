use serde::de::DeserializeOwned;

use crate::constants::{API_URL, GENERIC_API_MSG};
use crate::data_types::{api_data_types::ApiMessage, ApiError};

pub mod staff_api;
pub mod student_api;

pub(crate) fn api_url() -> &'static str {
    API_URL.get().expect("API_URL not initialized").as_str()
}

/// Parse a response at the boundary: non-2xx becomes a backend error with the
/// server's `{message}` when present, and a body that doesn't match the
/// expected shape is a malformed-response error rather than a trusted value.
pub(crate) async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    if !resp.status().is_success() {
        return Err(error_from_response(resp).await);
    }
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

pub(crate) async fn error_from_response(resp: reqwest::Response) -> ApiError {
    let status = resp.status().as_u16();
    let message = resp
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ApiMessage>(&body).ok())
        .and_then(|m| m.message)
        .unwrap_or_else(|| GENERIC_API_MSG.to_string());
    ApiError::Backend { status, message }
}
