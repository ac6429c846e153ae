//! Resource listings
//!
//! Typed resources of the cloud API, the guards that validate their
//! envelopes, and authenticated clients that page through them.
//!
//! | Resource       | Path                                                   | Pagination  |
//! |----------------|--------------------------------------------------------|-------------|
//! | Apps           | `/apps`                                                | page number |
//! | GitHub repos   | `/users/{id}/oauth/github/repositories`                | page token  |
//! | GitHub branches| `/users/{id}/oauth/github/repositories/{repo}/branches`| page token  |
//! | SSH keys       | `/users/{id}/sshkeys`                                  | none        |

mod clients;
mod types;

pub use clients::{AppClient, UserClient};
pub use types::{
    is_app_list_response, is_app_response, is_github_branch_list_response,
    is_github_repo_list_response, is_ssh_key_list_response, App, GithubBranch, GithubRepo, SshKey,
};
