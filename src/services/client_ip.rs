use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};
use ipnetwork::IpNetwork;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_governor::GovernorError;
use tower_governor::key_extractor::KeyExtractor;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Works out which address a form post came from, so throttling applies per visitor
/// and not per load balancer.
#[derive(Clone, Debug)]
pub struct ClientIp {
    trusted_proxies: Arc<[IpNetwork]>,
}

impl ClientIp {
    #[must_use]
    pub fn new(trusted_proxies: impl IntoIterator<Item = IpNetwork>) -> Self {
        Self { trusted_proxies: trusted_proxies.into_iter().collect() }
    }

    /// The peer itself unless it is one of our proxies; otherwise the nearest forwarded hop
    /// that is not.
    #[must_use]
    pub fn resolve(&self, headers: &HeaderMap, peer: IpAddr) -> IpAddr {
        if !self.trusts(peer) {
            return peer;
        }

        forwarded_hops(headers).into_iter().rev().find(|hop| !self.trusts(*hop)).unwrap_or(peer)
    }

    fn trusts(&self, ip: IpAddr) -> bool {
        self.trusted_proxies.iter().any(|net| net.contains(ip))
    }
}

/// Every parseable `X-Forwarded-For` entry, oldest first, across repeated headers.
fn forwarded_hops(headers: &HeaderMap) -> Vec<IpAddr> {
    headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|hop| hop.trim().parse().ok())
        .collect()
}

impl KeyExtractor for ClientIp {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let ConnectInfo(peer) =
            req.extensions().get::<ConnectInfo<SocketAddr>>().ok_or(GovernorError::UnableToExtractKey)?;

        Ok(self.resolve(req.headers(), peer.ip()))
    }
}
