//! Presigned download handler
//!
//! Serves stored objects to holders of a valid download token. The token is
//! bound to one object key and carries the filename used for the
//! `Content-Disposition` header.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use booking_core::DomainError;
use serde::Deserialize;
use tracing::warn;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Query string of a download link
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub token: Option<String>,
}

/// Download a stored object
///
/// GET /files/{object_key}?token=...
pub async fn download(
    State(state): State<AppState>,
    Path(object_key): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Response> {
    let token = query.token.ok_or(ApiError::InvalidDownloadToken)?;
    let filename = state.signer().verify(&object_key, &token).map_err(|e| {
        warn!(key = %object_key, error = %e, "Download token rejected");
        ApiError::InvalidDownloadToken
    })?;

    let bytes = state
        .service_context()
        .blob_store()
        .fetch(&object_key)
        .await?
        .ok_or(DomainError::ObjectNotFound(object_key))?;

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        ),
        (header::CONTENT_DISPOSITION, content_disposition(&filename)),
    ];
    Ok((headers, bytes).into_response())
}

/// `attachment` with an ASCII `filename` fallback and the exact UTF-8 name
/// in `filename*` (RFC 6266 / RFC 5987)
fn content_disposition(filename: &str) -> HeaderValue {
    let fallback: String = filename
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        encode_ext_value(filename)
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Percent-encode every byte outside the RFC 5987 `attr-char` set
fn encode_ext_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}
