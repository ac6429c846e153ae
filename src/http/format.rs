//! Human-readable rendering of requests and responses for diagnostics

use super::request::ApiRequest;
use super::response::{
    transform_api_response, ApiResponse, ApiResponseError, ApiResponseSuccess, RawResponse,
};
use crate::types::JsonValue;

/// Longest raw body included in an HTTP error rendering
pub const FORMAT_ERROR_BODY_MAX_LENGTH: usize = 1000;

/// Render a request together with any envelope
pub fn format_api_response(req: &ApiRequest, res: &ApiResponse) -> String {
    match res {
        ApiResponse::Success(s) => format_api_success(req, s),
        ApiResponse::Error(e) => format_api_error(req, e),
    }
}

/// Render a request together with a success envelope
pub fn format_api_success(req: &ApiRequest, res: &ApiResponseSuccess) -> String {
    format!(
        "Request: {} {}\nResponse: {}\nBody: \n{}",
        req.method,
        req.display_url(),
        res.meta.status,
        pretty(&res.data)
    )
}

/// Render a request together with an error envelope
pub fn format_api_error(req: &ApiRequest, res: &ApiResponseError) -> String {
    format!(
        "Request: {} {}\nResponse: {}\nBody: \n{}",
        req.method,
        req.display_url(),
        res.meta.status,
        pretty(&res.error)
    )
}

/// Render a failed HTTP exchange.
///
/// Uses the envelope rendering when the body decodes, otherwise the raw body
/// truncated to [`FORMAT_ERROR_BODY_MAX_LENGTH`] characters.
pub fn format_http_error(req: &ApiRequest, raw: &RawResponse) -> String {
    if let Ok(res) = transform_api_response(raw) {
        return format_api_response(req, &res);
    }

    let mut f = format!(
        "HTTP Error {}: {} {}\n",
        raw.status,
        req.method,
        req.display_url()
    );

    let text = raw.text();
    if text.is_empty() {
        f.push_str("\n<no buffered body>");
        return f;
    }

    let total = text.chars().count();
    f.push('\n');
    f.extend(text.chars().take(FORMAT_ERROR_BODY_MAX_LENGTH));

    if total > FORMAT_ERROR_BODY_MAX_LENGTH {
        f.push_str(&format!(
            " ...\n\n[ truncated {} characters ]",
            total - FORMAT_ERROR_BODY_MAX_LENGTH
        ));
    }

    f
}

fn pretty(value: &JsonValue) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
