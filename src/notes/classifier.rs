use indicatif::ProgressBar;
use std::collections::{BTreeSet, HashSet};

use crate::error::Result;
use crate::github::ReleaseSource;
use crate::notes::contributors::{identify, ContributorRegistry};
use crate::notes::range::Boundary;
use crate::taxonomy::{Sections, Taxonomy};

#[derive(Debug, Clone)]
pub struct Classified {
    pub sections: Sections,
    pub reviewers: BTreeSet<String>,
    pub search_hits: usize,
}

/// Buckets pull requests merged after the boundary whose merge commit is in
/// `hashes`, and collects their reviewers.
pub async fn classify_pulls(
    source: &dyn ReleaseSource,
    boundary: &Boundary,
    hashes: &HashSet<String>,
    taxonomy: &Taxonomy,
    registry: &mut ContributorRegistry,
    pb: &ProgressBar,
) -> Result<Classified> {
    let results = source
        .search_merged_pulls(&boundary.search_qualifier())
        .await?;

    // Search is capped by GitHub; report it rather than guess at a fix.
    if results.is_truncated() {
        tracing::warn!(
            "Search returned {} of {} pull requests, release notes may be incomplete",
            results.items.len(),
            results.total_count
        );
    }

    pb.set_length(results.items.len() as u64);

    let mut sections = taxonomy.empty_sections();
    let mut reviewers = BTreeSet::new();

    for hit in &results.items {
        pb.inc(1);

        let pull = source.get_pull(hit.number).await?;
        let merged_here = pull
            .merge_commit_sha
            .as_ref()
            .is_some_and(|sha| hashes.contains(sha));
        if !merged_here {
            tracing::debug!("Skipping #{}: merge commit not on target ref", hit.number);
            continue;
        }

        for review in source.list_reviews(hit.number).await? {
            if let Some(user) = review.user {
                identify(source, registry, &user.login).await?;
                reviewers.insert(user.login);
            }
        }

        let classification = taxonomy.classify(&hit.title);
        sections.insert(classification.label, hit.number, classification.summary);
    }

    tracing::info!(
        "Kept {} of {} merged pull requests",
        sections.total(),
        results.items.len()
    );

    Ok(Classified {
        sections,
        reviewers,
        search_hits: results.items.len(),
    })
}
