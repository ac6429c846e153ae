//! Paginator implementations
//!
//! Both paginators are single-pass and non-restartable: cursor state only
//! moves forward and, once done, a pull returns [`Pull::Exhausted`] without
//! touching the request generator or transport.

use super::types::{
    Guard, PageCursorState, PageSource, PaginatorDeps, Pull, RequestGenerator, ResponsePage,
    TokenCursorState,
};
use crate::error::{Error, Result};
use crate::http::{format_api_success, ApiRequest, ApiResponseSuccess, ApiTransport};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Query parameter carrying the page number
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Query parameter carrying the continuation token
pub const PAGE_TOKEN_PARAM: &str = "page_token";

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page-number paginator
///
/// Requests `?page=N` (plus `page_size` when set), starting at 1. Stops on an
/// empty page, on a page shorter than `page_size`, or once `max` items have
/// been loaded.
pub struct Paginator<T> {
    transport: Arc<dyn ApiTransport>,
    reqgen: Box<dyn RequestGenerator>,
    guard: Guard,
    max: Option<usize>,
    state: PageCursorState,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned + Send> Paginator<T> {
    /// Create a paginator; see [`PageCursorState`] for how `deps.state` is merged
    pub fn new(deps: PaginatorDeps<PageCursorState>) -> Self {
        Self {
            transport: deps.transport,
            reqgen: deps.reqgen,
            guard: deps.guard,
            max: deps.max,
            state: PageCursorState::merged(deps.state),
            _marker: PhantomData,
        }
    }

    /// Current cursor state
    pub fn state(&self) -> &PageCursorState {
        &self.state
    }

    /// Maximum item count, if any
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Fetch the next page.
    ///
    /// A page rejected by the guard fails with [`Error::FatalApiFormat`] and
    /// leaves the cursor state untouched.
    pub async fn pull(&mut self) -> Result<Pull<T>> {
        if self.state.done {
            return Ok(Pull::Exhausted);
        }

        let mut req = self.reqgen.generate().await?;
        req.set_query(PAGE_PARAM, self.state.page.to_string());
        if let Some(size) = self.state.page_size {
            req.set_query(PAGE_SIZE_PARAM, size.to_string());
        }

        debug!(page = self.state.page, "Fetching page {}", req.display_url());
        let res = self.transport.execute(&req).await?;

        if !(self.guard)(&res) {
            warn!(page = self.state.page, "Page rejected by guard");
            return Err(fatal_api_format(&req, &res));
        }

        let page = decode_page(&req, res)?;
        let count = page.len();
        self.state.loaded += count;

        if count == 0
            || self.max.is_some_and(|max| self.state.loaded >= max)
            || self.state.page_size.is_some_and(|size| count < size as usize)
        {
            self.state.done = true;
        }

        self.state.page += 1;

        debug!(
            items = count,
            loaded = self.state.loaded,
            done = self.state.done,
            "Page fetched"
        );
        Ok(Pull::Page(page))
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send> PageSource<T> for Paginator<T> {
    async fn pull(&mut self) -> Result<Pull<T>> {
        Paginator::pull(self).await
    }

    fn is_done(&self) -> bool {
        self.state.done
    }

    fn loaded(&self) -> usize {
        self.state.loaded
    }
}

impl<T> fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("state", &self.state)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Token Pagination
// ============================================================================

/// Token paginator
///
/// Sends the server's last `next_page_token` as `?page_token=...` (omitted
/// on the first call). Stops on an empty page, once `max` items have been
/// loaded, or when the server returns no next token.
pub struct TokenPaginator<T> {
    transport: Arc<dyn ApiTransport>,
    reqgen: Box<dyn RequestGenerator>,
    guard: Guard,
    max: Option<usize>,
    state: TokenCursorState,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned + Send> TokenPaginator<T> {
    /// Create a paginator; see [`TokenCursorState`] for how `deps.state` is merged
    pub fn new(deps: PaginatorDeps<TokenCursorState>) -> Self {
        Self {
            transport: deps.transport,
            reqgen: deps.reqgen,
            guard: deps.guard,
            max: deps.max,
            state: TokenCursorState::merged(deps.state),
            _marker: PhantomData,
        }
    }

    /// Current cursor state
    pub fn state(&self) -> &TokenCursorState {
        &self.state
    }

    /// Maximum item count, if any
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Fetch the next page.
    ///
    /// Metadata whose page tokens are not strings, or a page rejected by the
    /// guard, fails with [`Error::FatalApiFormat`] and leaves the cursor
    /// state untouched. The metadata check runs first.
    pub async fn pull(&mut self) -> Result<Pull<T>> {
        if self.state.done {
            return Ok(Pull::Exhausted);
        }

        let mut req = self.reqgen.generate().await?;
        if let Some(token) = &self.state.page_token {
            req.set_query(PAGE_TOKEN_PARAM, token.clone());
        }

        debug!(
            has_token = self.state.page_token.is_some(),
            "Fetching page {}",
            req.display_url()
        );
        let res = self.transport.execute(&req).await?;

        let Some(tokens) = res.meta.page_tokens() else {
            warn!("Response metadata has malformed page tokens");
            return Err(fatal_api_format(&req, &res));
        };

        if !(self.guard)(&res) {
            warn!("Page rejected by guard");
            return Err(fatal_api_format(&req, &res));
        }

        let page = decode_page(&req, res)?;
        let count = page.len();
        self.state.loaded += count;

        if count == 0
            || self.max.is_some_and(|max| self.state.loaded >= max)
            || tokens.next_page_token.is_none()
        {
            self.state.done = true;
        }

        self.state.page_token = tokens.next_page_token;

        debug!(
            items = count,
            loaded = self.state.loaded,
            done = self.state.done,
            "Page fetched"
        );
        Ok(Pull::Page(page))
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send> PageSource<T> for TokenPaginator<T> {
    async fn pull(&mut self) -> Result<Pull<T>> {
        TokenPaginator::pull(self).await
    }

    fn is_done(&self) -> bool {
        self.state.done
    }

    fn loaded(&self) -> usize {
        self.state.loaded
    }
}

impl<T> fmt::Debug for TokenPaginator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPaginator")
            .field("state", &self.state)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Fatal format error rendering the offending exchange
pub fn fatal_api_format(req: &ApiRequest, res: &ApiResponseSuccess) -> Error {
    Error::fatal_api_format(format_api_success(req, res))
}

/// Deserialize the envelope's `data` into typed items
fn decode_page<T: DeserializeOwned>(
    req: &ApiRequest,
    res: ApiResponseSuccess,
) -> Result<ResponsePage<T>> {
    match Vec::<T>::deserialize(&res.data) {
        Ok(data) => Ok(ResponsePage {
            data,
            meta: res.meta,
        }),
        Err(e) => {
            warn!("Page data does not match the expected item type: {e}");
            Err(fatal_api_format(req, &res))
        }
    }
}
