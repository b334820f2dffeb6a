use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::ReleaseSource;
use crate::notes::classifier::classify_pulls;
use crate::notes::contributors::ContributorRegistry;
use crate::notes::harvester::{collect_commits, scan_commits};
use crate::notes::range::resolve_boundary;
use crate::notes::ReleaseNotes;
use crate::taxonomy::Taxonomy;

pub struct ReleaseNotesPipeline {
    source: Arc<dyn ReleaseSource>,
    taxonomy: Taxonomy,
    config: PipelineConfig,
}

impl ReleaseNotesPipeline {
    pub fn new(source: impl ReleaseSource + 'static, config: PipelineConfig) -> Self {
        Self {
            source: Arc::new(source),
            taxonomy: Taxonomy::default(),
            config,
        }
    }

    /// Gathers everything the release notes for `version` need, covering
    /// `from_tag` up to `to_ref`.
    pub async fn run(&self, from_tag: &str, to_ref: &str, version: &str) -> Result<ReleaseNotes> {
        let source = self.source.as_ref();

        // Step 1: Resolve the starting tag to a timestamp
        tracing::info!("Resolving tag {} in {}", from_tag, source.full_name());
        let boundary = resolve_boundary(source, from_tag).await?;

        // Step 2: Harvest commits and their people
        let spinner = self.spinner(format!(
            "Getting all commits between {} and {}",
            from_tag, to_ref
        ));
        let commits = collect_commits(source, to_ref, &boundary).await?;
        spinner.finish_and_clear();

        let mut registry = ContributorRegistry::new();
        let pb = self.bar(commits.len() as u64, "Getting committers and authors");
        let harvest = scan_commits(source, commits, &mut registry, &pb).await?;
        pb.finish_and_clear();

        // Step 3: Classify pull requests merged into the harvested history
        let pb = self.bar(0, "Pull Requests...");
        let classified = classify_pulls(
            source,
            &boundary,
            &harvest.hashes,
            &self.taxonomy,
            &mut registry,
            &pb,
        )
        .await?;
        pb.finish_and_clear();

        tracing::info!(
            "{} authors, {} reviewers, {} committers",
            harvest.authors.len(),
            classified.reviewers.len(),
            harvest.committers.len()
        );

        Ok(ReleaseNotes {
            version: version.to_string(),
            sections: classified.sections,
            authors: harvest.authors,
            reviewers: classified.reviewers,
            committers: harvest.committers,
            contributors: registry,
        })
    }

    fn bar(&self, len: u64, message: &str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}",
            )
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message(message.to_string());
        pb
    }

    fn spinner(&self, message: String) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::notes::testing::{commit, hit, pull, review, FakeSource};
    use crate::taxonomy::OTHER_PULL_REQUEST;

    fn quiet() -> PipelineConfig {
        PipelineConfig {
            show_progress: false,
        }
    }

    fn napari_fixture() -> FakeSource {
        FakeSource::default()
            .with_tag("v0.2.0", "tagsha", Some("Tue, 07 Jan 2020 16:40:30 GMT"))
            .with_commits(vec![
                commit("m10", Some("jni"), Some("web-flow")),
                commit("m12", Some("Czaki"), Some("Czaki")),
                commit("c99", Some("azure-pipelines-bot"), None),
            ])
            .with_hits(vec![
                hit(10, "Bugfix: fix crash on load"),
                hit(11, "New Feature: on a release branch"),
                hit(12, "Refactor internals"),
            ])
            .with_pull(pull(10, "m10"))
            .with_pull(pull(11, "elsewhere"))
            .with_pull(pull(12, "m12"))
            .with_reviews(10, vec![review(1, Some("sofroniewn")), review(2, None)])
            .with_user("jni", Some("Juan Nunez-Iglesias"))
            .with_user("Czaki", Some("Grzegorz Bokota"))
            .with_user("web-flow", Some("GitHub"))
            .with_user("azure-pipelines-bot", None)
            .with_user("sofroniewn", None)
    }

    #[tokio::test]
    async fn test_run_end_to_end() {
        let source = napari_fixture();
        let pipeline = ReleaseNotesPipeline::new(source, quiet());

        let notes = pipeline.run("v0.2.0", "main", "0.3.0").await.unwrap();

        assert_eq!(notes.version, "0.3.0");
        assert_eq!(notes.sections.total(), 2);
        assert_eq!(
            notes.sections.get("Bugfix").unwrap().entries[0].summary,
            "fix crash on load"
        );
        assert_eq!(
            notes.sections.get(OTHER_PULL_REQUEST).unwrap().entries[0].number,
            12
        );
        assert!(notes.sections.get("New Feature").unwrap().is_empty());

        assert_eq!(notes.authors.iter().collect::<Vec<_>>(), vec!["Czaki", "jni"]);
        assert_eq!(notes.committers.iter().collect::<Vec<_>>(), vec!["Czaki"]);
        assert_eq!(notes.reviewers.iter().collect::<Vec<_>>(), vec!["sofroniewn"]);
        assert_eq!(notes.contributors.display_name("sofroniewn"), Some("sofroniewn"));
    }

    #[tokio::test]
    async fn test_missing_tag_aborts_before_listing_commits() {
        let source = Arc::new(napari_fixture());
        let pipeline = ReleaseNotesPipeline {
            source: source.clone(),
            taxonomy: Taxonomy::default(),
            config: quiet(),
        };

        let err = pipeline.run("v0.14.0", "main", "0.15.0").await.unwrap_err();

        assert!(matches!(err, Error::TagNotFound(ref tag) if tag == "v0.14.0"));
        assert!(err.to_string().contains("v0.14.0"));
        assert_eq!(
            source.requests_matching("commits:main:2020-01-07T16:40:30Z"),
            0
        );
    }

    #[tokio::test]
    async fn test_committer_date_used_without_last_modified() {
        let source = Arc::new(
            FakeSource::default()
                .with_tag("v0.1.0", "tagsha", None)
                .with_commits(Vec::new()),
        );
        let pipeline = ReleaseNotesPipeline {
            source: source.clone(),
            taxonomy: Taxonomy::default(),
            config: quiet(),
        };

        let notes = pipeline.run("v0.1.0", "main", "0.2.0").await.unwrap();

        assert_eq!(notes.sections.total(), 0);
        assert_eq!(
            source.requests_matching("commits:main:2019-12-31T23:00:00Z"),
            1
        );
    }
}
