//! In-memory [`ReleaseSource`] for exercising the pipeline without GitHub.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::github::ReleaseSource;
use crate::models::{
    CommitSummary, GitCommit, GitCommitResponse, GitHubUser, GitSignature, IssueSummary,
    PullRequest, Review, SearchResults, Tag, TagCommit, UserRef,
};
use crate::notes::range::Boundary;

#[derive(Default)]
pub(crate) struct FakeSource {
    tags: Vec<Tag>,
    git_commits: HashMap<String, GitCommitResponse>,
    commits: Vec<CommitSummary>,
    hits: Vec<IssueSummary>,
    pulls: HashMap<u64, PullRequest>,
    reviews: HashMap<u64, Vec<Review>>,
    users: HashMap<String, Option<String>>,
    requests: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_tag(mut self, name: &str, sha: &str, last_modified: Option<&str>) -> Self {
        self.tags.push(Tag {
            name: name.to_string(),
            commit: TagCommit {
                sha: sha.to_string(),
            },
        });
        self.git_commits.insert(
            sha.to_string(),
            GitCommitResponse {
                commit: GitCommit {
                    sha: sha.to_string(),
                    committer: GitSignature {
                        name: "Release Bot".to_string(),
                        email: "bot@example.com".to_string(),
                        date: Utc.with_ymd_and_hms(2019, 12, 31, 23, 0, 0).unwrap(),
                    },
                },
                last_modified: last_modified.map(str::to_string),
            },
        );
        self
    }

    pub fn with_commits(mut self, commits: Vec<CommitSummary>) -> Self {
        self.commits = commits;
        self
    }

    pub fn with_hits(mut self, hits: Vec<IssueSummary>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_pull(mut self, pull: PullRequest) -> Self {
        self.pulls.insert(pull.number, pull);
        self
    }

    pub fn with_reviews(mut self, number: u64, reviews: Vec<Review>) -> Self {
        self.reviews.insert(number, reviews);
        self
    }

    pub fn with_user(mut self, login: &str, name: Option<&str>) -> Self {
        self.users
            .insert(login.to_string(), name.map(str::to_string));
        self
    }

    pub fn requests_matching(&self, request: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.as_str() == request)
            .count()
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

#[async_trait]
impl ReleaseSource for FakeSource {
    fn full_name(&self) -> &str {
        "napari/napari"
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.record("tags".to_string());
        Ok(self.tags.clone())
    }

    async fn get_git_commit(&self, sha: &str) -> Result<GitCommitResponse> {
        self.record(format!("git_commit:{sha}"));
        self.git_commits
            .get(sha)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("no commit {sha}")))
    }

    async fn list_commits(&self, sha: &str, since: &str) -> Result<Vec<CommitSummary>> {
        self.record(format!("commits:{sha}:{since}"));
        Ok(self.commits.clone())
    }

    async fn search_merged_pulls(&self, merged_after: &str) -> Result<SearchResults<IssueSummary>> {
        self.record(format!("search:{merged_after}"));
        Ok(SearchResults {
            total_count: self.hits.len() as u64,
            incomplete_results: false,
            items: self.hits.clone(),
        })
    }

    async fn get_pull(&self, number: u64) -> Result<PullRequest> {
        self.record(format!("pull:{number}"));
        self.pulls
            .get(&number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("no pull {number}")))
    }

    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>> {
        self.record(format!("reviews:{number}"));
        Ok(self.reviews.get(&number).cloned().unwrap_or_default())
    }

    async fn get_user(&self, login: &str) -> Result<GitHubUser> {
        self.record(format!("user:{login}"));
        match self.users.get(login) {
            Some(name) => Ok(GitHubUser {
                login: login.to_string(),
                id: 1,
                name: name.clone(),
            }),
            None => Err(Error::UserNotFound(login.to_string())),
        }
    }
}

pub(crate) fn commit(sha: &str, author: Option<&str>, committer: Option<&str>) -> CommitSummary {
    let user = |login: &str| UserRef {
        login: login.to_string(),
    };
    CommitSummary {
        sha: sha.to_string(),
        author: author.map(user),
        committer: committer.map(user),
    }
}

pub(crate) fn hit(number: u64, title: &str) -> IssueSummary {
    IssueSummary {
        number,
        title: title.to_string(),
    }
}

pub(crate) fn pull(number: u64, merge_commit_sha: &str) -> PullRequest {
    PullRequest {
        number,
        title: String::new(),
        merged_at: Some(Utc.with_ymd_and_hms(2020, 2, 1, 12, 0, 0).unwrap()),
        merge_commit_sha: Some(merge_commit_sha.to_string()),
    }
}

pub(crate) fn review(id: u64, login: Option<&str>) -> Review {
    Review {
        id,
        user: login.map(|l| UserRef {
            login: l.to_string(),
        }),
    }
}

/// Boundary at 2020-01-07 16:40:30 UTC.
pub(crate) fn boundary(tag: &str) -> Boundary {
    Boundary {
        tag: tag.to_string(),
        timestamp: NaiveDate::from_ymd_opt(2020, 1, 7)
            .unwrap()
            .and_hms_opt(16, 40, 30)
            .unwrap(),
    }
}
