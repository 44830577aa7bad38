//! Hostname resolution
//!
//! The validator only needs "every address this host maps to right now".
//! That lookup sits behind [`HostResolver`] so handlers and tests can swap the
//! system resolver for a fixed table.

use async_trait::async_trait;
use std::io;
use std::net::IpAddr;
use tracing::debug;

/// Resolves a hostname to the full set of addresses it currently maps to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Look up every A/AAAA record for `host`. `port` is only used to build
    /// the socket address handed to the OS resolver.
    async fn lookup(&self, host: &str, port: u16) -> io::Result<Vec<IpAddr>>;
}

/// Resolver backed by the operating system (`getaddrinfo`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn lookup(&self, host: &str, port: u16) -> io::Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, port)).await?;

        let mut ips: Vec<IpAddr> = Vec::new();
        for addr in addrs {
            if !ips.contains(&addr.ip()) {
                ips.push(addr.ip());
            }
        }

        debug!(host, count = ips.len(), "resolved host");
        Ok(ips)
    }
}
