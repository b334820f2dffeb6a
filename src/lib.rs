pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod notes;
pub mod report;
pub mod taxonomy;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubClient, GitHubRepo, ReleaseSource};
pub use notes::{ReleaseNotes, ReleaseNotesPipeline};
pub use report::render;
pub use taxonomy::Taxonomy;
