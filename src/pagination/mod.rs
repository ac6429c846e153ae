//! Pagination module
//!
//! Supports: Page Number, Page Token
//!
//! # Overview
//!
//! A paginator walks one collection resource. Each [`pull`](PageSource::pull)
//! issues exactly one request, validates the envelope with the caller's
//! guard, updates the cursor, and hands the page back. Pulls take `&mut self`,
//! so they are serialized by construction.
//!
//! ```rust,ignore
//! let mut paginator = client.paginate::<App, _, _>(reqgen, is_app_list_response, None, None);
//! while let Pull::Page(page) = paginator.pull().await? {
//!     apps.extend(page.data);
//! }
//! ```

mod collect;
mod strategies;
mod types;

pub use collect::{collect_all, into_stream};
pub use strategies::{
    fatal_api_format, Paginator, TokenPaginator, PAGE_PARAM, PAGE_SIZE_PARAM, PAGE_TOKEN_PARAM,
};
pub use types::{
    Guard, PageCursorState, PageSource, PaginatorDeps, Pull, RequestGenerator, ResponsePage,
    TokenCursorState,
};
