use reqwest::{header, Client, Response, StatusCode};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::RateLimiter;
use crate::models::{
    CommitSummary, GitCommit, GitCommitResponse, GitHubUser, IssueSummary, PullRequest,
    Repository, Review, SearchResults, Tag,
};

const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(
            &config.github_token,
            &config.api_base_url,
            RateLimiter::with_requests_per_minute(config.requests_per_minute),
        )
    }

    pub fn with_base_url(token: &str, base_url: &str, rate_limiter: RateLimiter) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("relnotes/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);
        tracing::info!("Fetching repository: {}/{}", owner, repo);

        let response = self.get(&url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::RepoNotFound(format!("{}/{}", owner, repo)));
        }

        Ok(ensure_success(response, &url).await?.json().await?)
    }

    pub async fn list_tags(&self, full_name: &str) -> Result<Vec<Tag>> {
        let url = format!("{}/repos/{}/tags", self.base_url, full_name);
        tracing::debug!("Listing tags for: {}", full_name);
        self.paginator().fetch_all(&url, &[], PER_PAGE).await
    }

    /// Fetches a git commit object along with its `Last-Modified` header.
    pub async fn get_git_commit(&self, full_name: &str, sha: &str) -> Result<GitCommitResponse> {
        let url = format!("{}/repos/{}/git/commits/{}", self.base_url, full_name, sha);
        tracing::debug!("Fetching git commit: {}", short_sha(sha));

        let response = ensure_success(self.get(&url).await?, &url).await?;
        let last_modified = response
            .headers()
            .get(header::LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let commit: GitCommit = response.json().await?;

        Ok(GitCommitResponse {
            commit,
            last_modified,
        })
    }

    /// Commits reachable from `sha` with a commit date at or after `since`
    /// (an ISO 8601 timestamp).
    pub async fn list_commits(
        &self,
        full_name: &str,
        sha: &str,
        since: &str,
    ) -> Result<Vec<CommitSummary>> {
        let url = format!("{}/repos/{}/commits", self.base_url, full_name);
        let query = [("sha", sha.to_string()), ("since", since.to_string())];
        tracing::debug!("Listing commits on {} since {}", sha, since);
        self.paginator().fetch_all(&url, &query, PER_PAGE).await
    }

    pub async fn search_issues(&self, q: &str) -> Result<SearchResults<IssueSummary>> {
        let url = format!("{}/search/issues", self.base_url);
        tracing::debug!("Searching issues: {}", q);
        self.paginator()
            .fetch_search(&url, &[("q", q.to_string())], PER_PAGE)
            .await
    }

    pub async fn get_pull(&self, full_name: &str, number: u64) -> Result<PullRequest> {
        let url = format!("{}/repos/{}/pulls/{}", self.base_url, full_name, number);
        let response = ensure_success(self.get(&url).await?, &url).await?;
        Ok(response.json().await?)
    }

    pub async fn list_reviews(&self, full_name: &str, number: u64) -> Result<Vec<Review>> {
        let url = format!(
            "{}/repos/{}/pulls/{}/reviews",
            self.base_url, full_name, number
        );
        self.paginator().fetch_all(&url, &[], PER_PAGE).await
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::debug!("Fetching user: {}", username);

        let response = self.get(&url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        Ok(ensure_success(response, &url).await?.json().await?)
    }

    fn paginator(&self) -> Paginator<'_> {
        Paginator::new(&self.client, &self.rate_limiter)
    }

    async fn get(&self, url: &str) -> Result<Response> {
        self.rate_limiter.wait().await;
        let response = self.client.get(url).send().await?;
        self.rate_limiter
            .update_from_headers(response.headers())
            .await;
        Ok(response)
    }
}

/// Passes successful responses through and turns everything else into an
/// error, distinguishing rate limiting from other failures.
pub(crate) async fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let headers = response.headers();
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false);

    if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted) {
        return Err(Error::RateLimited(retry_after_secs(headers)));
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!(
        "Request to {} failed: {} - {}",
        context, status, body
    )))
}

fn retry_after_secs(headers: &header::HeaderMap) -> u64 {
    let parse = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };

    if let Some(secs) = parse("retry-after") {
        return secs;
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    parse("x-ratelimit-reset")
        .map(|reset| reset.saturating_sub(now))
        .unwrap_or(60)
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
