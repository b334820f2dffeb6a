use chrono::{DateTime, NaiveDateTime};

use crate::error::{Error, Result};
use crate::github::ReleaseSource;
use crate::models::Tag;

/// Format of the `Last-Modified` header on git commit objects.
pub const LAST_MODIFIED_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// Lower bound of the release: the starting tag and its commit time (UTC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    pub tag: String,
    pub timestamp: NaiveDateTime,
}

impl Boundary {
    /// Rendering for the commits API `since` parameter.
    pub fn since_param(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Rendering for the search `merged:>` qualifier.
    pub fn search_qualifier(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

pub fn find_tag<'a>(tags: &'a [Tag], name: &str) -> Option<&'a Tag> {
    tags.iter().find(|tag| tag.name == name)
}

pub fn parse_last_modified(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, LAST_MODIFIED_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc2822(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

pub async fn resolve_boundary(source: &dyn ReleaseSource, tag_name: &str) -> Result<Boundary> {
    let tags = source.list_tags().await?;
    let tag = find_tag(&tags, tag_name).ok_or_else(|| Error::TagNotFound(tag_name.to_string()))?;

    let response = source.get_git_commit(&tag.commit.sha).await?;
    let timestamp = match response.last_modified.as_deref().and_then(parse_last_modified) {
        Some(timestamp) => timestamp,
        None => {
            tracing::warn!(
                "No usable Last-Modified for {}, using committer date",
                tag_name
            );
            response.commit.committer.date.naive_utc()
        }
    };

    tracing::info!("Tag {} points at {} ({})", tag_name, tag.commit.sha, timestamp);
    Ok(Boundary {
        tag: tag_name.to_string(),
        timestamp,
    })
}
