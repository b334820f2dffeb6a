pub mod client;
pub mod paginator;
pub mod rate_limiter;
pub mod source;

pub use client::GitHubClient;
pub use paginator::Paginator;
pub use rate_limiter::RateLimiter;
pub use source::{merged_pulls_query, GitHubRepo, ReleaseSource};
