use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::ensure_success;
use crate::github::rate_limiter::RateLimiter;
use crate::models::SearchResults;

pub struct Paginator<'a> {
    client: &'a Client,
    rate_limiter: &'a RateLimiter,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, rate_limiter: &'a RateLimiter) -> Self {
        Self {
            client,
            rate_limiter,
        }
    }

    /// Collects every page of a list endpoint.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        per_page: u32,
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let (items, has_next): (Vec<T>, bool) =
                self.fetch_page(url, query, per_page, page).await?;
            let items_count = items.len();
            all_items.extend(items);

            if !has_next || items_count < per_page as usize {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }

    /// Collects every page of a search endpoint into a single envelope.
    /// `total_count` comes from the last page. `incomplete_results` is set
    /// if any page reported it.
    pub async fn fetch_search<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        per_page: u32,
    ) -> Result<SearchResults<T>> {
        let mut results = SearchResults::default();
        let mut page = 1;

        loop {
            let (envelope, has_next): (SearchResults<T>, bool) =
                self.fetch_page(url, query, per_page, page).await?;
            let items_count = envelope.items.len();
            results.total_count = envelope.total_count;
            results.incomplete_results |= envelope.incomplete_results;
            results.items.extend(envelope.items);

            if !has_next || items_count < per_page as usize {
                break;
            }

            page += 1;
        }

        Ok(results)
    }

    async fn fetch_page<P: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        per_page: u32,
        page: u32,
    ) -> Result<(P, bool)> {
        self.rate_limiter.wait().await;

        tracing::debug!("Fetching: {} (page {})", url, page);
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await?;
        self.rate_limiter
            .update_from_headers(response.headers())
            .await;

        let response = ensure_success(response, url).await?;

        // Check for next page in Link header
        let has_next = response
            .headers()
            .get("link")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("rel=\"next\""))
            .unwrap_or(false);

        Ok((response.json().await?, has_next))
    }
}
