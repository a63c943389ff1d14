//! GitLab v4 REST client
//!
//! Thin wrapper over `reqwest` for the three list endpoints the mirror run
//! consumes: projects, project-scope variables and group-scope variables.
//! All of them are paginated the same way and drained through
//! [`pagination::fetch_all_pages`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{MirrorError, Result};
use crate::models::{Project, Variable};
use crate::services::pagination::{self, PagedResult, PAGE_SIZE};

const GITLAB_API_VERSION: &str = "v4";

/// Read access to the remote project collection
#[async_trait]
pub trait ProjectSource {
    /// Every project visible to the token, across all pages
    async fn all_projects(&self) -> PagedResult<Project>;
}

/// Read access to the two CI/CD variable scopes
#[async_trait]
pub trait VariableSource {
    async fn project_variables(&self, project_id: u64) -> PagedResult<Variable>;
    async fn group_variables(&self, group_name: &str) -> PagedResult<Variable>;
}

/// HTTP client for a single GitLab instance
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitLabClient {
    pub fn new(host: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: host.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn build_api_url(&self, path: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, GITLAB_API_VERSION, path)
    }

    /// Fetch one page of a JSON list endpoint.
    ///
    /// With `not_found_is_empty`, a 404 response counts as an empty page:
    /// the variable endpoints answer 404 when the group does not exist, and
    /// that must read as "no variables", not as a failure.
    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        not_found_is_empty: bool,
    ) -> Result<Vec<T>> {
        let url = self.build_api_url(path);
        let response = self
            .http
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .query(&[
                ("per_page", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND && not_found_is_empty {
            tracing::warn!("{} answered 404, treating as empty: {}", url, body.trim());
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(MirrorError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        if body.trim() == "[]" {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ProjectSource for GitLabClient {
    async fn all_projects(&self) -> PagedResult<Project> {
        pagination::fetch_all_pages(|page| self.get_page("projects", page, false)).await
    }
}

#[async_trait]
impl VariableSource for GitLabClient {
    async fn project_variables(&self, project_id: u64) -> PagedResult<Variable> {
        let path = format!("projects/{}/variables", project_id);
        pagination::fetch_all_pages(|page| self.get_page(&path, page, true)).await
    }

    async fn group_variables(&self, group_name: &str) -> PagedResult<Variable> {
        let path = format!("groups/{}/variables", urlencoding::encode(group_name));
        pagination::fetch_all_pages(|page| self.get_page(&path, page, true)).await
    }
}
