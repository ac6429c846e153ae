//! Request execution capability

use super::request::ApiRequest;
use super::response::ApiResponseSuccess;
use crate::error::Result;
use async_trait::async_trait;

/// Anything that can send an [`ApiRequest`] and hand back a success envelope.
///
/// [`ApiClient`](super::ApiClient) is the production implementation;
/// paginators only ever see this trait.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send the request and decode the response
    async fn execute(&self, req: &ApiRequest) -> Result<ApiResponseSuccess>;
}
