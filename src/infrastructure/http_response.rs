// HTTP response utilities for JSON+Brotli encoding
use crate::application::proxy_service::ProxyReply;
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Response, StatusCode, header},
};
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// Names the reason behind a proxy answer (see `DataOrigin`)
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// Check if client accepts Brotli compression
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

async fn encode_body(
    bytes: Vec<u8>,
    compress: bool,
) -> Result<(Vec<u8>, Option<&'static str>), StatusCode> {
    if !compress {
        return Ok((bytes, None));
    }

    let original_len = bytes.len();
    let mut encoder = BrotliEncoder::new(std::io::Cursor::new(bytes));
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await.map_err(|e| {
        tracing::error!("Brotli compression error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    tracing::debug!("Compressed: {} → {} bytes", original_len, compressed.len());

    Ok((compressed, Some("br")))
}

/// Serialize `data` as JSON with optional compression
pub async fn json_response<T: Serialize>(
    status: StatusCode,
    data: &T,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let json = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let (body_bytes, content_encoding) = encode_body(json, compress).await?;

    let mut response_builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CACHE_CONTROL, "no-store")
        .header(header::CONTENT_LENGTH, HeaderValue::from(body_bytes.len()));

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Proxy answer: the reply's own status, plus the origin header
pub async fn proxy_response(
    reply: &ProxyReply,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let status = StatusCode::from_u16(reply.status).map_err(|e| {
        tracing::error!("Unusable status {}: {}", reply.status, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut response = json_response(status, &reply.body, compress).await?;
    response.headers_mut().insert(
        DATA_SOURCE_HEADER,
        HeaderValue::from_static(reply.origin.as_str()),
    );
    Ok(response)
}
