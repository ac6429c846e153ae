//! CLI module
//!
//! Command-line interface for listing cloud API resources.
//!
//! # Commands
//!
//! - `apps` - List apps (page-number pagination)
//! - `repos` - List linked GitHub repositories (token pagination)
//! - `branches` - List branches of a linked repository (token pagination)
//! - `ssh-keys` - List a user's SSH keys

mod commands;
mod runner;
mod table;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use table::columnar;
