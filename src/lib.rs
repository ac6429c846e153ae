// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # api-pager
//!
//! Page-number and token paginators over a JSON envelope cloud API.
//!
//! ## Features
//!
//! - **Page Number Pagination**: `?page=N&page_size=M`, stops on empty or short pages
//! - **Token Pagination**: follows `meta.next_page_token` until the server stops sending one
//! - **Guards**: caller-supplied predicates validate every page before it is trusted
//! - **Envelope Decoding**: `{ data, meta }` / `{ error, meta }` with `204` handled
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use api_pager::config::ClientConfig;
//! use api_pager::http::ApiClient;
//! use api_pager::pagination::collect_all;
//! use api_pager::resources::AppClient;
//!
//! #[tokio::main]
//! async fn main() -> api_pager::Result<()> {
//!     let client = ApiClient::new(ClientConfig::new("https://api.example.com"))?;
//!     let apps = AppClient::new(client, "token");
//!
//!     let mut paginator = apps.paginate(Some(25), None);
//!     let all = collect_all(&mut paginator).await?;
//!     println!("{} apps", all.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │             CLI  (apps / repos / branches / ssh-keys)    │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │     Resources  (AppClient, UserClient, guards)           │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌───────────────────────────┬──────────────────────────────┐
//! │       Pagination          │            HTTP              │
//! ├───────────────────────────┼──────────────────────────────┤
//! │ Paginator (page number)   │ ApiClient (make / do)        │
//! │ TokenPaginator            │ Envelope decoding            │
//! │ collect_all / into_stream │ Diagnostics formatting       │
//! └───────────────────────────┴──────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document envelope fields before the first release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// API client, requests and response envelopes
pub mod http;

/// Page-number and token paginators
pub mod pagination;

/// Typed resources, guards and resource clients
pub mod resources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use http::{ApiClient, ApiRequest, ApiResponse, ApiResponseSuccess, ApiTransport};
pub use pagination::{
    collect_all, into_stream, PageCursorState, PageSource, Paginator, PaginatorDeps, Pull,
    ResponsePage, TokenCursorState, TokenPaginator,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
