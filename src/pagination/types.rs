//! Pagination types and traits
//!
//! Defines the cursor states, the pull result, and the collaborator
//! capabilities every paginator is constructed with.

use crate::error::Result;
use crate::http::{ApiRequest, ApiResponseSuccess, ApiTransport, ResponseMeta};
use async_trait::async_trait;
use std::sync::Arc;

/// Progress through a page-numbered listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursorState {
    /// Next page to request, starting at 1
    pub page: u32,
    /// Expected page size; a shorter page ends the listing
    pub page_size: Option<u32>,
    /// Set once a terminating condition is observed, never reset
    pub done: bool,
    /// Items yielded so far across all pages
    pub loaded: usize,
}

impl Default for PageCursorState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: None,
            done: false,
            loaded: 0,
        }
    }
}

impl PageCursorState {
    /// Initial state requesting `page_size` items per page
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: Some(page_size),
            ..Default::default()
        }
    }

    /// Merge a caller-supplied state with the defaults.
    ///
    /// The defaults for `page`, `done` and `loaded` are applied last, so only
    /// `page_size` survives from the caller.
    pub(crate) fn merged(state: Option<Self>) -> Self {
        let defaults = Self::default();
        match state {
            Some(state) => Self {
                page_size: state.page_size,
                ..defaults
            },
            None => defaults,
        }
    }
}

/// Progress through a token-continuation listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCursorState {
    /// Token for the next request; absent on the first call
    pub page_token: Option<String>,
    /// Set once a terminating condition is observed, never reset
    pub done: bool,
    /// Items yielded so far across all pages
    pub loaded: usize,
}

impl TokenCursorState {
    /// Initial state continuing from `token`
    pub fn with_page_token(token: impl Into<String>) -> Self {
        Self {
            page_token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Merge a caller-supplied state with the defaults.
    ///
    /// The defaults for `done` and `loaded` are applied last; `page_token`
    /// survives from the caller.
    pub(crate) fn merged(state: Option<Self>) -> Self {
        let defaults = Self::default();
        match state {
            Some(state) => Self {
                page_token: state.page_token,
                ..defaults
            },
            None => defaults,
        }
    }
}

/// One decoded server response
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsePage<T> {
    /// Items in server order, possibly empty
    pub data: Vec<T>,
    /// Envelope metadata
    pub meta: ResponseMeta,
}

impl<T> ResponsePage<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Result of a single pull
#[derive(Debug, Clone, PartialEq)]
pub enum Pull<T> {
    /// No more pages; nothing was requested
    Exhausted,
    /// A freshly fetched page
    Page(ResponsePage<T>),
}

impl<T> Pull<T> {
    /// Check if the paginator was already exhausted
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The page, if one was fetched
    pub fn into_page(self) -> Option<ResponsePage<T>> {
        match self {
            Self::Page(page) => Some(page),
            Self::Exhausted => None,
        }
    }
}

/// Predicate validating a decoded envelope before its data is trusted
pub type Guard = Box<dyn Fn(&ApiResponseSuccess) -> bool + Send + Sync>;

/// Produces a fresh outbound request for each pull
#[async_trait]
pub trait RequestGenerator: Send + Sync {
    /// Build the next request
    async fn generate(&self) -> Result<ApiRequest>;
}

#[async_trait]
impl<F> RequestGenerator for F
where
    F: Fn() -> Result<ApiRequest> + Send + Sync,
{
    async fn generate(&self) -> Result<ApiRequest> {
        (self)()
    }
}

/// Everything a paginator is constructed with
pub struct PaginatorDeps<S> {
    /// Executes requests
    pub transport: Arc<dyn ApiTransport>,
    /// Builds one request per pull
    pub reqgen: Box<dyn RequestGenerator>,
    /// Validates each page
    pub guard: Guard,
    /// Initial cursor state, merged with the defaults
    pub state: Option<S>,
    /// Stop once this many items have been loaded
    pub max: Option<usize>,
}

impl<S> PaginatorDeps<S> {
    /// Create deps with default state and no maximum
    pub fn new<R, G>(transport: Arc<dyn ApiTransport>, reqgen: R, guard: G) -> Self
    where
        R: RequestGenerator + 'static,
        G: Fn(&ApiResponseSuccess) -> bool + Send + Sync + 'static,
    {
        Self {
            transport,
            reqgen: Box::new(reqgen),
            guard: Box::new(guard),
            state: None,
            max: None,
        }
    }

    /// Set the initial state
    #[must_use]
    pub fn state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }

    /// Set the maximum item count
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

/// Common interface over the page-number and token paginators
#[async_trait]
pub trait PageSource<T: Send>: Send {
    /// Fetch the next page, or report exhaustion without any request
    async fn pull(&mut self) -> Result<Pull<T>>;

    /// Check if pagination is complete
    fn is_done(&self) -> bool;

    /// Items yielded so far
    fn loaded(&self) -> usize;
}
