//! Response envelopes
//!
//! Every API response body is an envelope: `{ data, meta }` on success or
//! `{ error, meta }` on failure. This module decodes buffered HTTP responses
//! into [`ApiResponse`] and exposes the metadata the paginators rely on.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, CONTENT_TYPE_JSON};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope metadata present on every response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// HTTP status echoed by the server
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: u16,
    /// API version
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: String,
    /// Server-side request identifier
    #[serde(default, deserialize_with = "lenient_string")]
    pub request_id: String,
    /// Any other metadata (page tokens, counts, ...)
    #[serde(flatten)]
    pub extra: JsonObject,
}

// Servers send `null` or odd types for metadata they don't fill in.
fn lenient_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u16, D::Error> {
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()).unwrap_or_default(),
        JsonValue::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => s,
        JsonValue::Null => String::new(),
        other => other.to_string(),
    })
}

/// Continuation tokens carried by token-paginated responses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTokenMeta {
    pub prev_page_token: Option<String>,
    pub next_page_token: Option<String>,
}

impl ResponseMeta {
    /// Metadata for a `204 No Content` response
    pub fn no_content() -> Self {
        Self {
            status: 204,
            version: String::new(),
            request_id: String::new(),
            extra: JsonObject::new(),
        }
    }

    /// Page tokens, or `None` if either token field has a non-string value.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) count as an absent token.
    pub fn page_tokens(&self) -> Option<PageTokenMeta> {
        Some(PageTokenMeta {
            prev_page_token: token_field(&self.extra, "prev_page_token")?,
            next_page_token: token_field(&self.extra, "next_page_token")?,
        })
    }
}

fn token_field(extra: &JsonObject, key: &str) -> Option<Option<String>> {
    match extra.get(key) {
        None | Some(JsonValue::Null) | Some(JsonValue::Bool(false)) => Some(None),
        Some(JsonValue::String(s)) if s.is_empty() => Some(None),
        Some(JsonValue::String(s)) => Some(Some(s.clone())),
        Some(JsonValue::Number(n)) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => Some(None),
        Some(_) => None,
    }
}

/// A success envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponseSuccess {
    pub data: JsonValue,
    pub meta: ResponseMeta,
}

impl ApiResponseSuccess {
    /// `data` as a list of items, if it is one
    pub fn items(&self) -> Option<&Vec<JsonValue>> {
        self.data.as_array()
    }
}

/// An error envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponseError {
    pub error: JsonValue,
    pub meta: ResponseMeta,
}

/// A decoded response envelope
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Success(ApiResponseSuccess),
    Error(ApiResponseError),
}

impl ApiResponse {
    /// Decode an envelope from a JSON body.
    ///
    /// A body carrying `data` and no non-null top-level `error` is a
    /// success; anything else with `meta` is an error envelope.
    pub fn from_value(body: JsonValue) -> Result<Self> {
        let JsonValue::Object(mut obj) = body else {
            return Err(Error::UnknownResponseFormat);
        };

        let meta = match obj.remove("meta") {
            None | Some(JsonValue::Null) => return Err(Error::UnknownResponseFormat),
            Some(meta @ JsonValue::Object(_)) => {
                serde_json::from_value(meta).map_err(|_| Error::UnknownResponseFormat)?
            }
            Some(_) => ResponseMeta::default(),
        };

        match obj.remove("error") {
            Some(error) if !error.is_null() => Ok(Self::Error(ApiResponseError { error, meta })),
            _ => match obj.remove("data") {
                Some(data) => Ok(Self::Success(ApiResponseSuccess { data, meta })),
                None => Ok(Self::Error(ApiResponseError {
                    error: JsonValue::Null,
                    meta,
                })),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn meta(&self) -> &ResponseMeta {
        match self {
            Self::Success(s) => &s.meta,
            Self::Error(e) => &e.meta,
        }
    }
}

/// A fully buffered HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    /// Create a raw response
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: content_type.map(String::from),
            body: body.into(),
        }
    }

    /// Buffer a reqwest response
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?;

        Ok(Self {
            status,
            content_type,
            body,
        })
    }

    /// Media type without parameters, lower-cased
    pub fn media_type(&self) -> Option<String> {
        self.content_type.as_deref().map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    /// Body as text (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Decode a buffered response into an envelope.
///
/// `204 No Content` yields an empty success envelope whatever the body.
pub fn transform_api_response(raw: &RawResponse) -> Result<ApiResponse> {
    if raw.status == 204 {
        return Ok(ApiResponse::Success(ApiResponseSuccess {
            data: JsonValue::Null,
            meta: ResponseMeta::no_content(),
        }));
    }

    if raw.media_type().as_deref() != Some(CONTENT_TYPE_JSON) {
        return Err(Error::unknown_content_type(
            raw.content_type.clone().unwrap_or_default(),
        ));
    }

    let body: JsonValue = serde_json::from_slice(&raw.body)?;
    ApiResponse::from_value(body)
}
