use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

pub struct RateLimiter {
    state: Arc<Mutex<RateLimitState>>,
    requests_per_minute: Option<u32>,
}

struct RateLimitState {
    remaining: u32,
    reset_at: Option<Instant>,
    requests_this_minute: u32,
    minute_start: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_requests_per_minute(None)
    }

    /// A limiter that additionally never issues more than `limit` requests
    /// in any sixty second window.
    pub fn with_requests_per_minute(limit: Option<u32>) -> Self {
        Self {
            state: Arc::new(Mutex::new(RateLimitState {
                remaining: 5000,
                reset_at: None,
                requests_this_minute: 0,
                minute_start: Instant::now(),
            })),
            requests_per_minute: limit,
        }
    }

    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        // Exhausted window: sleep until GitHub resets it
        if state.remaining == 0 {
            if let Some(reset_at) = state.reset_at.take() {
                let now = Instant::now();
                if reset_at > now {
                    let wait_duration = reset_at - now;
                    drop(state);
                    tracing::info!("Rate limited, waiting {:?}", wait_duration);
                    sleep(wait_duration).await;
                    state = self.state.lock().await;
                }
            }
        }

        if let Some(limit) = self.requests_per_minute {
            let minute_elapsed = state.minute_start.elapsed();
            if minute_elapsed < Duration::from_secs(60) {
                if state.requests_this_minute >= limit {
                    let wait_time = Duration::from_secs(60) - minute_elapsed;
                    drop(state);
                    tracing::debug!("Soft rate limiting, waiting {:?}", wait_time);
                    sleep(wait_time).await;
                    state = self.state.lock().await;
                    state.requests_this_minute = 0;
                    state.minute_start = Instant::now();
                }
            } else {
                state.requests_this_minute = 0;
                state.minute_start = Instant::now();
            }
            state.requests_this_minute += 1;
        }
    }

    pub async fn update_from_headers(&self, headers: &HeaderMap) {
        let Some(remaining) = header_u64(headers, "x-ratelimit-remaining") else {
            return;
        };
        let reset = header_u64(headers, "x-ratelimit-reset");

        let mut state = self.state.lock().await;
        state.remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
        state.reset_at = reset.and_then(|reset_timestamp| {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            (reset_timestamp > now)
                .then(|| Instant::now() + Duration::from_secs(reset_timestamp - now))
        });
    }

    pub async fn remaining(&self) -> u32 {
        self.state.lock().await.remaining
    }

    /// Seconds until the current window resets, if known.
    pub async fn seconds_until_reset(&self) -> Option<u64> {
        let state = self.state.lock().await;
        state
            .reset_at
            .map(|at| at.saturating_duration_since(Instant::now()).as_secs())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
