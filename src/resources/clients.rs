//! Authenticated resource clients
//!
//! Thin wrappers around [`ApiClient`] that know the resource paths, attach
//! bearer authentication, and build paginators with the right guard.

use super::types::{
    is_app_list_response, is_app_response, is_github_branch_list_response,
    is_github_repo_list_response, is_ssh_key_list_response, App, GithubBranch, GithubRepo, SshKey,
};
use crate::error::Result;
use crate::http::{ApiClient, ApiRequest, ApiResponseSuccess, RequestModifiers};
use crate::pagination::{fatal_api_format, PageCursorState, Paginator, TokenPaginator};
use crate::types::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Client for the `/apps` collection
#[derive(Debug, Clone)]
pub struct AppClient {
    client: ApiClient,
    token: String,
}

impl AppClient {
    pub fn new(client: ApiClient, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }

    /// Fetch a single app
    pub async fn load(&self, app_id: &str, modifiers: Option<&RequestModifiers>) -> Result<App> {
        let req = self
            .client
            .make(Method::GET, &format!("/apps/{app_id}"))?
            .bearer(&self.token)
            .apply_modifiers(modifiers);
        let res = self.client.do_request(&req).await?;

        if !is_app_response(&res) {
            return Err(fatal_api_format(&req, &res));
        }
        decode(&req, &res)
    }

    /// Page through every app the user can see
    pub fn paginate(&self, page_size: Option<u32>, max: Option<usize>) -> Paginator<App> {
        let client = self.client.clone();
        let token = self.token.clone();
        let reqgen = move || -> Result<ApiRequest> {
            Ok(client.make(Method::GET, "/apps")?.bearer(&token))
        };

        self.client.paginate(
            reqgen,
            is_app_list_response,
            page_size.map(PageCursorState::with_page_size),
            max,
        )
    }
}

/// Client for per-user collections
#[derive(Debug, Clone)]
pub struct UserClient {
    client: ApiClient,
    token: String,
}

impl UserClient {
    pub fn new(client: ApiClient, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }

    /// Page through the GitHub repositories linked to a user
    pub fn paginate_github_repositories(
        &self,
        user_id: u64,
        max: Option<usize>,
    ) -> TokenPaginator<GithubRepo> {
        self.token_listing(
            format!("/users/{user_id}/oauth/github/repositories"),
            is_github_repo_list_response,
            max,
        )
    }

    /// Page through the branches of a linked GitHub repository
    pub fn paginate_github_branches(
        &self,
        user_id: u64,
        repo_id: u64,
        max: Option<usize>,
    ) -> TokenPaginator<GithubBranch> {
        self.token_listing(
            format!("/users/{user_id}/oauth/github/repositories/{repo_id}/branches"),
            is_github_branch_list_response,
            max,
        )
    }

    /// List a user's SSH keys (single request)
    pub async fn list_ssh_keys(&self, user_id: u64) -> Result<Vec<SshKey>> {
        let req = self
            .client
            .make(Method::GET, &format!("/users/{user_id}/sshkeys"))?
            .bearer(&self.token);
        let res = self.client.do_request(&req).await?;

        if !is_ssh_key_list_response(&res) {
            return Err(fatal_api_format(&req, &res));
        }
        decode(&req, &res)
    }

    fn token_listing<T, G>(&self, path: String, guard: G, max: Option<usize>) -> TokenPaginator<T>
    where
        T: DeserializeOwned + Send,
        G: Fn(&ApiResponseSuccess) -> bool + Send + Sync + 'static,
    {
        debug!("Creating token paginator for {}", path);
        let client = self.client.clone();
        let token = self.token.clone();
        let reqgen = move || -> Result<ApiRequest> {
            Ok(client.make(Method::GET, &path)?.bearer(&token))
        };

        self.client.paginate_tokens(reqgen, guard, None, max)
    }
}

fn decode<T: DeserializeOwned>(req: &ApiRequest, res: &ApiResponseSuccess) -> Result<T> {
    T::deserialize(&res.data).map_err(|_| fatal_api_format(req, res))
}
