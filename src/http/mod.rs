//! HTTP client module
//!
//! Provides the API client and the envelope types it decodes.
//!
//! # Features
//!
//! - **Envelope Decoding**: `{ data, meta }` / `{ error, meta }` bodies, with `204` special-cased
//! - **Owned Requests**: inspectable [`ApiRequest`] values paginators can extend
//! - **TLS & Proxy**: custom CAs, client certificates and proxies from config
//! - **Diagnostics**: readable renderings of failed and unrecognized exchanges

mod client;
mod format;
mod request;
mod response;
mod transport;

pub use client::ApiClient;
pub use format::{
    format_api_error, format_api_response, format_api_success, format_http_error,
    FORMAT_ERROR_BODY_MAX_LENGTH,
};
pub use request::{ApiRequest, RequestModifiers};
pub use response::{
    transform_api_response, ApiResponse, ApiResponseError, ApiResponseSuccess, PageTokenMeta,
    RawResponse, ResponseMeta,
};
pub use transport::ApiTransport;
