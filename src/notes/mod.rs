pub mod classifier;
pub mod contributors;
pub mod harvester;
pub mod pipeline;
pub mod range;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::BTreeSet;

pub use classifier::{classify_pulls, Classified};
pub use contributors::ContributorRegistry;
pub use harvester::{Harvest, EXCLUDED_AUTHOR, EXCLUDED_COMMITTER};
pub use pipeline::ReleaseNotesPipeline;
pub use range::{find_tag, resolve_boundary, Boundary};

use crate::taxonomy::Sections;

/// Everything gathered for one release, ready to render.
#[derive(Debug, Clone)]
pub struct ReleaseNotes {
    pub version: String,
    pub sections: Sections,
    pub authors: BTreeSet<String>,
    pub reviewers: BTreeSet<String>,
    /// Collected but not printed.
    pub committers: BTreeSet<String>,
    pub contributors: ContributorRegistry,
}
