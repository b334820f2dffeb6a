use async_trait::async_trait;

use crate::error::Result;
use crate::github::client::GitHubClient;
use crate::models::{
    CommitSummary, GitCommitResponse, GitHubUser, IssueSummary, PullRequest, Repository, Review,
    SearchResults, Tag,
};

/// Everything the release notes pipeline reads from a hosted repository.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// `owner/name` of the repository being reported on.
    fn full_name(&self) -> &str;

    async fn list_tags(&self) -> Result<Vec<Tag>>;

    async fn get_git_commit(&self, sha: &str) -> Result<GitCommitResponse>;

    async fn list_commits(&self, sha: &str, since: &str) -> Result<Vec<CommitSummary>>;

    /// Pull requests merged strictly after `merged_after`, oldest first.
    async fn search_merged_pulls(&self, merged_after: &str) -> Result<SearchResults<IssueSummary>>;

    async fn get_pull(&self, number: u64) -> Result<PullRequest>;

    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>>;

    async fn get_user(&self, login: &str) -> Result<GitHubUser>;
}

/// Search query for pull requests merged into `full_name` after a timestamp.
pub fn merged_pulls_query(full_name: &str, merged_after: &str) -> String {
    format!(
        "repo:{} is:pr merged:>{} sort:created-asc",
        full_name, merged_after
    )
}

/// A [`ReleaseSource`] backed by the GitHub REST API.
pub struct GitHubRepo {
    client: GitHubClient,
    repository: Repository,
}

impl GitHubRepo {
    /// Looks the repository up once so a typo fails before any heavy listing.
    pub async fn open(client: GitHubClient, owner: &str, name: &str) -> Result<Self> {
        let repository = client.get_repository(owner, name).await?;
        Ok(Self { client, repository })
    }
}

#[async_trait]
impl ReleaseSource for GitHubRepo {
    fn full_name(&self) -> &str {
        &self.repository.full_name
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.client.list_tags(self.full_name()).await
    }

    async fn get_git_commit(&self, sha: &str) -> Result<GitCommitResponse> {
        self.client.get_git_commit(self.full_name(), sha).await
    }

    async fn list_commits(&self, sha: &str, since: &str) -> Result<Vec<CommitSummary>> {
        self.client.list_commits(self.full_name(), sha, since).await
    }

    async fn search_merged_pulls(&self, merged_after: &str) -> Result<SearchResults<IssueSummary>> {
        let query = merged_pulls_query(self.full_name(), merged_after);
        self.client.search_issues(&query).await
    }

    async fn get_pull(&self, number: u64) -> Result<PullRequest> {
        self.client.get_pull(self.full_name(), number).await
    }

    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>> {
        self.client.list_reviews(self.full_name(), number).await
    }

    async fn get_user(&self, login: &str) -> Result<GitHubUser> {
        self.client.get_user(login).await
    }
}
