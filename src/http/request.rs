//! Outbound request description
//!
//! An [`ApiRequest`] is an owned, inspectable description of one HTTP call.
//! Paginators attach cursor query parameters to it and diagnostics render
//! its method and URL; the client turns it into a reqwest request at send
//! time.

use crate::types::{JsonValue, Method};
use url::form_urlencoded;

/// Optional modifiers applied to resource requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestModifiers {
    /// Restrict the returned resource to these fields
    pub fields: Vec<String>,
}

impl RequestModifiers {
    /// Create modifiers selecting the given fields
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// A single outbound API request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL without query string
    pub url: String,
    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Option<JsonValue>,
}

impl ApiRequest {
    /// Create a request with no query, headers or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a query parameter, replacing any previous values for the key
    pub fn set_query(&mut self, key: &str, value: impl Into<String>) {
        self.query.retain(|(k, _)| k != key);
        self.query.push((key.to_string(), value.into()));
    }

    /// First value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any previous value (case-insensitive)
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&key));
        self.headers.push((key, value.into()));
        self
    }

    /// Header value by name (case-insensitive)
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Authenticate with a bearer token
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Apply resource modifiers (field selection)
    #[must_use]
    pub fn apply_modifiers(mut self, modifiers: Option<&RequestModifiers>) -> Self {
        if let Some(modifiers) = modifiers {
            for field in &modifiers.fields {
                self.query.push(("fields".to_string(), field.clone()));
            }
        }
        self
    }

    /// URL including the encoded query string
    pub fn display_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }

        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{sep}{encoded}", self.url)
    }
}
