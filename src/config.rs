use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const REPO_OWNER: &str = "napari";
pub const REPO_NAME: &str = "napari";

const MISSING_TOKEN: &str = "It is necessary that the environment variable `GH_TOKEN` \
be set to avoid running into problems with rate limiting. \
One can be acquired at https://github.com/settings/tokens.\n\n\
You do not need to select any permission boxes while generating the token.";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub api_base_url: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub requests_per_minute: Option<u32>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = lookup("GH_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config(MISSING_TOKEN.to_string()))?;

        let api_base_url = lookup("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let requests_per_minute = lookup("GH_REQUESTS_PER_MINUTE")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &u32| n > 0);

        Ok(Self {
            github_token,
            api_base_url,
            repo_owner: REPO_OWNER.to_string(),
            repo_name: REPO_NAME.to_string(),
            requests_per_minute,
        })
    }

    pub fn full_repo_name(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
        }
    }
}
