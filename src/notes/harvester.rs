use indicatif::ProgressBar;
use std::collections::{BTreeSet, HashSet};

use crate::error::Result;
use crate::github::ReleaseSource;
use crate::models::CommitSummary;
use crate::notes::contributors::{identify, ContributorRegistry};
use crate::notes::range::Boundary;

/// Bot account GitHub records as committer for web UI merges.
pub const EXCLUDED_COMMITTER: &str = "web-flow";
/// CI bot that shows up as an author of automated commits.
pub const EXCLUDED_AUTHOR: &str = "azure-pipelines-bot";

#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub commits: Vec<CommitSummary>,
    pub hashes: HashSet<String>,
    pub authors: BTreeSet<String>,
    pub committers: BTreeSet<String>,
}

/// Lists every commit on `to_ref` dated at or after the boundary.
pub async fn collect_commits(
    source: &dyn ReleaseSource,
    to_ref: &str,
    boundary: &Boundary,
) -> Result<Vec<CommitSummary>> {
    let commits = source.list_commits(to_ref, &boundary.since_param()).await?;
    tracing::info!(
        "Found {} commits between {} and {}",
        commits.len(),
        boundary.tag,
        to_ref
    );
    Ok(commits)
}

/// Records committers and authors of `commits` and the set of their hashes.
pub async fn scan_commits(
    source: &dyn ReleaseSource,
    commits: Vec<CommitSummary>,
    registry: &mut ContributorRegistry,
    pb: &ProgressBar,
) -> Result<Harvest> {
    let mut authors = BTreeSet::new();
    let mut committers = BTreeSet::new();

    for commit in &commits {
        if let Some(committer) = &commit.committer {
            identify(source, registry, &committer.login).await?;
            committers.insert(committer.login.clone());
        }
        if let Some(author) = &commit.author {
            identify(source, registry, &author.login).await?;
            authors.insert(author.login.clone());
        }
        pb.inc(1);
    }

    committers.remove(EXCLUDED_COMMITTER);
    authors.remove(EXCLUDED_AUTHOR);

    let hashes = commits.iter().map(|c| c.sha.clone()).collect();

    Ok(Harvest {
        commits,
        hashes,
        authors,
        committers,
    })
}
