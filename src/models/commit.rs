use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit: TagCommit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCommit {
    pub sha: String,
}

/// An entry from the commits listing. `author` and `committer` are the
/// linked GitHub accounts and are null when the git identity has none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    #[serde(default)]
    pub author: Option<UserRef>,
    #[serde(default)]
    pub committer: Option<UserRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitCommit {
    pub sha: String,
    pub committer: GitSignature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitSignature {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

/// A git commit object together with the `Last-Modified` header it was
/// served with.
#[derive(Debug, Clone)]
pub struct GitCommitResponse {
    pub commit: GitCommit,
    pub last_modified: Option<String>,
}
