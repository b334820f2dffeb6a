use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Desired tag ({0}) not found")]
    TagNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors raised by GitHub itself or the transport to it, as opposed to
    /// local configuration or lookup failures.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::GitHubApi(_)
                | Error::RateLimited(_)
                | Error::Network(_)
                | Error::UserNotFound(_)
                | Error::InvalidHeader(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_not_found_names_the_tag() {
        let err = Error::TagNotFound("v0.14.0".to_string());
        assert_eq!(err.to_string(), "Desired tag (v0.14.0) not found");
        assert!(!err.is_upstream());
    }

    #[test]
    fn test_upstream_classification() {
        assert!(Error::RateLimited(30).is_upstream());
        assert!(Error::GitHubApi("boom".into()).is_upstream());
        assert!(!Error::Config("missing".into()).is_upstream());
        assert!(!Error::RepoNotFound("napari/napari".into()).is_upstream());
    }

    #[test]
    fn test_invalid_header_is_upstream() {
        let bad = reqwest::header::HeaderValue::from_str("Bearer abc\n").unwrap_err();
        assert!(Error::from(bad).is_upstream());
    }
}
