//! API client
//!
//! Provides the HTTP client every resource listing goes through:
//! - Request construction against the configured API URL
//! - Proxy and TLS client-certificate setup
//! - Envelope decoding of successful responses
//! - Diagnostic rendering of failed ones

use super::format::{format_api_error, format_http_error};
use super::request::ApiRequest;
use super::response::{transform_api_response, ApiResponse, ApiResponseSuccess, RawResponse};
use super::transport::ApiTransport;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{
    Guard, PageCursorState, Paginator, PaginatorDeps, RequestGenerator, TokenCursorState,
    TokenPaginator,
};
use crate::types::{Method, CONTENT_TYPE_JSON};
use async_trait::async_trait;
use reqwest::{Certificate, Client, Identity, Proxy};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

/// HTTP client for the cloud API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client, reading any configured TLS material once
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent);

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        for path in &config.ssl.cafile {
            let pem = std::fs::read(path)?;
            builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
        }

        if !config.ssl.certfile.is_empty() {
            let mut pem = Vec::new();
            for path in config.ssl.certfile.iter().chain(&config.ssl.keyfile) {
                pem.extend(std::fs::read(path)?);
                pem.push(b'\n');
            }
            builder = builder.identity(Identity::from_pem(&pem)?);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Start a JSON request to `path`.
    ///
    /// Absolute URLs are used as-is; relative paths are joined onto the
    /// configured API URL.
    pub fn make(&self, method: Method, path: &str) -> Result<ApiRequest> {
        let url = self.build_url(path)?;
        Ok(ApiRequest::new(method, url)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .header("Accept", CONTENT_TYPE_JSON))
    }

    /// Send a request and decode the success envelope.
    ///
    /// Non-2xx statuses become [`Error::HttpStatus`] carrying a rendered
    /// diagnostic; an error envelope on a 2xx becomes
    /// [`Error::ErrorEnvelope`]. Nothing is retried.
    pub async fn do_request(&self, req: &ApiRequest) -> Result<ApiResponseSuccess> {
        let mut builder = self.client.request(req.method.into(), &req.url);

        for (key, value) in &req.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }

        if let Some(ref body) = req.body {
            builder = builder.json(body);
        }

        debug!("Sending request: {} {}", req.method, req.display_url());

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let raw = RawResponse::read(response).await?;

        if !(200..300).contains(&raw.status) {
            debug!("Request failed with {}: {} {}", raw.status, req.method, req.url);
            return Err(Error::http_status(raw.status, format_http_error(req, &raw)));
        }

        match transform_api_response(&raw)? {
            ApiResponse::Success(res) => Ok(res),
            ApiResponse::Error(res) => Err(Error::error_envelope(format_api_error(req, &res))),
        }
    }

    /// Page-number paginator bound to this client
    pub fn paginate<T, R, G>(
        &self,
        reqgen: R,
        guard: G,
        state: Option<PageCursorState>,
        max: Option<usize>,
    ) -> Paginator<T>
    where
        T: DeserializeOwned + Send,
        R: RequestGenerator + 'static,
        G: Fn(&ApiResponseSuccess) -> bool + Send + Sync + 'static,
    {
        Paginator::new(self.deps(reqgen, Box::new(guard), state, max))
    }

    /// Token paginator bound to this client
    pub fn paginate_tokens<T, R, G>(
        &self,
        reqgen: R,
        guard: G,
        state: Option<TokenCursorState>,
        max: Option<usize>,
    ) -> TokenPaginator<T>
    where
        T: DeserializeOwned + Send,
        R: RequestGenerator + 'static,
        G: Fn(&ApiResponseSuccess) -> bool + Send + Sync + 'static,
    {
        TokenPaginator::new(self.deps(reqgen, Box::new(guard), state, max))
    }

    fn deps<S, R>(
        &self,
        reqgen: R,
        guard: Guard,
        state: Option<S>,
        max: Option<usize>,
    ) -> PaginatorDeps<S>
    where
        R: RequestGenerator + 'static,
    {
        PaginatorDeps {
            transport: Arc::new(self.clone()),
            reqgen: Box::new(reqgen),
            guard,
            state,
            max,
        }
    }

    /// Stream the body at `url` into `writer`.
    ///
    /// `progress` receives `(loaded, total)` after each chunk, where `total`
    /// comes from `Content-Length` when the server sends one. Returns the
    /// number of bytes written.
    pub async fn download<W, F>(&self, url: &str, writer: &mut W, mut progress: F) -> Result<u64>
    where
        W: Write,
        F: FnMut(u64, Option<u64>),
    {
        let mut response = self
            .client
            .get(self.build_url(url)?)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::download(format!(
                "Encountered bad status code ({status}) for {url}\n\
                 This could mean the server is experiencing difficulties right now--please try again later."
            )));
        }

        let total = response.content_length();
        let mut loaded = 0u64;

        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_send_error(e))? {
            writer.write_all(&chunk)?;
            loaded += chunk.len() as u64;
            progress(loaded, total);
        }

        writer.flush()?;
        debug!("Downloaded {} bytes from {}", loaded, url);
        Ok(loaded)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> Result<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }

        match &self.config.api_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                Ok(format!("{base}/{path}"))
            }
            None => Err(Error::config(format!(
                "No API URL configured for relative path '{path}'"
            ))),
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout().as_millis() as u64,
            }
        } else {
            Error::Http(e)
        }
    }
}

#[async_trait]
impl ApiTransport for ApiClient {
    async fn execute(&self, req: &ApiRequest) -> Result<ApiResponseSuccess> {
        self.do_request(req).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
