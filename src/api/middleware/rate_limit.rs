//! Rate limiting middleware using token bucket algorithm.

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Limits for the token redemption endpoint.
///
/// The endpoint is called by the website's backend, so one client address
/// usually carries every user's sign-in. The defaults are sized for that
/// traffic, not for a single browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedeemRateLimit {
    /// Sustained requests per second per client address.
    pub per_second: u32,
    /// Requests allowed in a burst before throttling starts.
    pub burst: u32,
    /// Read the client address from `X-Forwarded-For` / `X-Real-IP` /
    /// `Forwarded` instead of the socket peer. Enable only behind a trusted
    /// reverse proxy.
    pub behind_proxy: bool,
}

impl RedeemRateLimit {
    pub const DEFAULT_PER_SECOND: u32 = 50;
    pub const DEFAULT_BURST: u32 = 200;
}

impl Default for RedeemRateLimit {
    fn default() -> Self {
        Self {
            per_second: Self::DEFAULT_PER_SECOND,
            burst: Self::DEFAULT_BURST,
            behind_proxy: false,
        }
    }
}

/// Keys requests by client IP: the socket peer, or the forwarded client
/// address when running behind a proxy.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

/// Creates a rate limiter for the token redemption endpoint.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The server
/// must be run with connect info so the peer address is available.
///
/// The webhook route is not limited: the bot platform delivers updates from a
/// small set of addresses and must not be throttled.
///
/// # Panics
///
/// Panics if `burst` is zero; [`crate::config::Config::validate`] rejects it.
pub fn redeem_layer(
    limits: RedeemRateLimit,
) -> GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let interval_ns = 1_000_000_000 / limits.per_second.max(1);
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_nanosecond(u64::from(interval_ns))
            .burst_size(limits.burst)
            .key_extractor(ClientIpKeyExtractor::new(limits.behind_proxy))
            .finish()
            .expect("non-zero rate limit settings"),
    );

    GovernorLayer::new(governor_conf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ConnectInfo;
    use std::net::SocketAddr;

    fn request(peer: &str, forwarded_for: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri("/auth/telegram/redeem");
        if let Some(ip) = forwarded_for {
            builder = builder.header("x-forwarded-for", ip);
        }
        let mut req = builder.body(()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
        req
    }

    #[test]
    fn test_peer_address_used_by_default() {
        let key = ClientIpKeyExtractor::new(false)
            .extract(&request("10.0.0.1:5000", Some("203.0.113.7")))
            .unwrap();

        assert_eq!(key, "10.0.0.1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_forwarded_address_used_behind_proxy() {
        let key = ClientIpKeyExtractor::new(true)
            .extract(&request("10.0.0.1:5000", Some("203.0.113.7")))
            .unwrap();

        assert_eq!(key, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_behind_proxy_falls_back_to_peer() {
        let key = ClientIpKeyExtractor::new(true)
            .extract(&request("10.0.0.1:5000", None))
            .unwrap();

        assert_eq!(key, "10.0.0.1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_default_limits_cover_backend_bursts() {
        let limits = RedeemRateLimit::default();
        assert!(limits.burst >= 100);
        assert!(limits.per_second >= 10);
        assert!(!limits.behind_proxy);
    }
}
