//! Resource types and their envelope guards

use crate::http::ApiResponseSuccess;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

// ============================================================================
// Resources
// ============================================================================

/// An app registered with the cloud API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
}

/// A GitHub repository visible through the user's OAuth link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubRepo {
    pub id: u64,
    pub full_name: String,
}

/// A branch of a linked GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubBranch {
    pub name: String,
}

/// An SSH public key registered for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    pub id: String,
    pub pubkey: String,
    pub fingerprint: String,
    pub annotation: String,
    pub name: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

// ============================================================================
// Guards
// ============================================================================

/// `data` is an object with an `id` and `name` string
pub fn is_app_response(res: &ApiResponseSuccess) -> bool {
    res.data.as_object().is_some_and(is_app)
}

/// `data` is a list of apps
pub fn is_app_list_response(res: &ApiResponseSuccess) -> bool {
    all_objects(res, is_app)
}

/// `data` is a list of GitHub repositories
pub fn is_github_repo_list_response(res: &ApiResponseSuccess) -> bool {
    all_objects(res, |o| has_u64(o, "id") && has_str(o, "full_name"))
}

/// `data` is a list of GitHub branches
pub fn is_github_branch_list_response(res: &ApiResponseSuccess) -> bool {
    all_objects(res, |o| has_str(o, "name"))
}

/// `data` is a list of SSH keys
pub fn is_ssh_key_list_response(res: &ApiResponseSuccess) -> bool {
    all_objects(res, |o| {
        ["id", "pubkey", "fingerprint", "annotation", "name"]
            .iter()
            .all(|key| has_str(o, key))
    })
}

fn is_app(o: &JsonObject) -> bool {
    has_str(o, "id") && has_str(o, "name")
}

fn all_objects<F>(res: &ApiResponseSuccess, check: F) -> bool
where
    F: Fn(&JsonObject) -> bool,
{
    res.items()
        .is_some_and(|items| items.iter().all(|v| v.as_object().is_some_and(&check)))
}

fn has_str(o: &JsonObject, key: &str) -> bool {
    matches!(o.get(key), Some(JsonValue::String(_)))
}

fn has_u64(o: &JsonObject, key: &str) -> bool {
    o.get(key).is_some_and(JsonValue::is_u64)
}
