//! Rate-limited registry wrapper.
//!
//! Wraps any [`Registry`] implementation with a governor rate limiter so
//! the whole sanitize run stays inside the public API's quota.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};

use crate::error::RegistryResult;
use crate::traits::{CompanyInfo, Registry};

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Minimum gap between registry calls.
///
/// The free tier allows 3 requests per minute; 21s keeps a margin.
pub const REGISTRY_COOLDOWN: Duration = Duration::from_secs(21);

/// A registry wrapper that enforces one call per cool-down interval.
pub struct RateLimitedRegistry<R: Registry> {
    inner: R,
    limiter: Arc<DefaultRateLimiter>,
}

impl<R: Registry> RateLimitedRegistry<R> {
    /// Wrap `registry` so calls are at least `cooldown` apart.
    pub fn new(registry: R, cooldown: Duration) -> Self {
        let quota = Quota::with_period(cooldown).expect("cooldown must be non-zero");
        Self {
            inner: registry,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Wrap with the production cool-down.
    pub fn with_default_cooldown(registry: R) -> Self {
        Self::new(registry, REGISTRY_COOLDOWN)
    }
}

#[async_trait]
impl<R: Registry> Registry for RateLimitedRegistry<R> {
    async fn lookup(&self, tax_id: &str) -> RegistryResult<Option<CompanyInfo>> {
        self.limiter.until_ready().await;
        self.inner.lookup(tax_id).await
    }
}
