//! Request Rate Limiter (Token Bucket)
//!
//! Guards the `/api` surface against request floods. State is a single
//! atomic word, so concurrent handlers never contend on a lock.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Token bucket shared by every request; cloning shares the bucket
#[derive(Clone)]
pub struct RateLimiter {
    state: Arc<AtomicState>,
    max_tokens: u32,
    refill_rate: u32, // tokens per second
}

struct AtomicState {
    // Upper 32 bits: available tokens
    // Lower 32 bits: last refill (milliseconds since creation)
    packed: AtomicU64,
    creation_time: Instant,
}

impl RateLimiter {
    /// `max_tokens` is the burst size, `refill_rate` the sustained
    /// requests per second. `RateLimiter::new(200, 100)` allows bursts of
    /// 200 and 100 req/s after that.
    pub fn new(max_tokens: u32, refill_rate: u32) -> Self {
        let tokens = (max_tokens as u64) << 32;
        Self {
            state: Arc::new(AtomicState {
                packed: AtomicU64::new(tokens),
                creation_time: Instant::now(),
            }),
            max_tokens,
            refill_rate,
        }
    }

    /// Consume one token. Returns false when the bucket is empty.
    pub fn check(&self) -> bool {
        // Truncation is intended: the clock is modulo 2^32 ms (~49.7 days)
        let elapsed_ms = Instant::now()
            .duration_since(self.state.creation_time)
            .as_millis() as u32;
        self.check_at(elapsed_ms)
    }

    fn check_at(&self, elapsed_ms: u32) -> bool {
        loop {
            let packed = self.state.packed.load(Ordering::Acquire);
            let tokens = (packed >> 32) as u32;
            let last_refill_ms = (packed & 0xFFFF_FFFF) as u32;

            // Wrapping keeps the delta right across a clock wrap
            let delta_ms = elapsed_ms.wrapping_sub(last_refill_ms);

            let tokens_to_add = (delta_ms as u64 * self.refill_rate as u64) / 1000;
            let available = (tokens as u64 + tokens_to_add).min(self.max_tokens as u64) as u32;

            // Sub-token remainders carry over to the next call
            let refill_ms = if tokens_to_add > 0 {
                elapsed_ms
            } else {
                last_refill_ms
            };

            if available == 0 {
                return false;
            }

            let new_packed = (((available - 1) as u64) << 32) | refill_ms as u64;
            if self
                .state
                .packed
                .compare_exchange(packed, new_packed, Ordering::Release, Ordering::Acquire)
                .is_ok()
            {
                return true;
            }
        }
    }

    /// Tokens currently left in the bucket (without refill)
    pub fn remaining(&self) -> u32 {
        (self.state.packed.load(Ordering::Acquire) >> 32) as u32
    }
}

/// Middleware rejecting requests with 429 once the bucket is empty
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.limiter.check() {
        warn!(path = %request.uri().path(), "Rate limit exceeded");
        return ApiError::Throttled.into_response();
    }
    next.run(request).await
}
