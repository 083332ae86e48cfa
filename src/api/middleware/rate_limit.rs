//! Per-client rate limiting using the token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Governor layer keyed by `K`, as applied to the router.
pub type RateLimitLayer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Token bucket settings for one route group.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Redirects and health checks: 2 requests per second, burst of 100.
pub const PUBLIC: RateLimit = RateLimit {
    per_second: 2,
    burst_size: 100,
};

/// Management API: 1 request per second, burst of 10.
pub const API: RateLimit = RateLimit {
    per_second: 1,
    burst_size: 10,
};

/// Limiter keyed by the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The router
/// must be served with `into_make_service_with_connect_info::<SocketAddr>`.
pub fn layer(limit: RateLimit) -> RateLimitLayer<PeerIpKeyExtractor> {
    build(limit, PeerIpKeyExtractor)
}

/// Limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, falling
/// back to the peer address.
///
/// Only for deployments behind a trusted reverse proxy; otherwise clients can
/// pick their own key.
pub fn proxy_layer(limit: RateLimit) -> RateLimitLayer<SmartIpKeyExtractor> {
    build(limit, SmartIpKeyExtractor)
}

fn build<K: KeyExtractor>(limit: RateLimit, key_extractor: K) -> RateLimitLayer<K> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .per_second(limit.per_second)
        .burst_size(limit.burst_size)
        .finish()
        .expect("rate limit period and burst size are non-zero");

    GovernorLayer::new(Arc::new(governor_conf))
}
