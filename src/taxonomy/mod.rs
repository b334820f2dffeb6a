pub mod sections;

pub use sections::{PullEntry, Section, Sections};

/// Catch-all bucket for pull requests whose title carries no known prefix.
pub const OTHER_PULL_REQUEST: &str = "Other Pull Request";

pub const DEFAULT_LABELS: [&str; 7] = [
    "Highlight",
    "New Feature",
    "Improvement",
    "Bugfix",
    "API Change",
    "Deprecation",
    "Build Tool",
];

/// Where a pull request title lands and what is printed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub label: &'a str,
    pub summary: String,
}

/// Ordered release-note categories. Order decides both which prefix wins
/// and the order sections are printed in.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    labels: Vec<String>,
}

impl Taxonomy {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Picks the first label whose `"<label>: "` prefix starts the title,
    /// ignoring case, and strips that prefix. Unmatched titles go to
    /// [`OTHER_PULL_REQUEST`] unchanged.
    pub fn classify<'a>(&'a self, title: &str) -> Classification<'a> {
        let lowered = title.to_lowercase();

        for label in &self.labels {
            let prefix = format!("{}: ", label.to_lowercase());
            if lowered.starts_with(&prefix) {
                let skip = prefix.chars().count();
                let summary = title
                    .char_indices()
                    .nth(skip)
                    .map(|(i, _)| &title[i..])
                    .unwrap_or("");
                return Classification {
                    label,
                    summary: summary.to_string(),
                };
            }
        }

        Classification {
            label: OTHER_PULL_REQUEST,
            summary: title.to_string(),
        }
    }

    /// Empty buckets for every label, with the catch-all last.
    pub fn empty_sections(&self) -> Sections {
        Sections::new(
            self.labels
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(OTHER_PULL_REQUEST)),
        )
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(DEFAULT_LABELS)
    }
}
