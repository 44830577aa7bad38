//! URL validation with DNS resolution
//!
//! A URL is accepted only when it is well-formed, uses `http`/`https`, and
//! every address its host resolves to is publicly routable. One bad address
//! among several good ones still rejects the request: a multi-homed or
//! rebinding host must not be able to smuggle an internal target through.

use super::address::classify;
use super::error::ValidationError;
use super::resolver::{HostResolver, SystemResolver};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};
use url::{Host, ParseError, Url};

/// A URL that passed validation, together with the addresses it was checked against
#[derive(Debug, Clone)]
pub struct ValidatedUrl {
    url: Url,
    addresses: Vec<IpAddr>,
}

impl ValidatedUrl {
    /// Re-serialized URL, as handed to the fetch tool
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// The parsed URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Every address the host resolved to at validation time
    pub fn addresses(&self) -> &[IpAddr] {
        &self.addresses
    }
}

/// SSRF validator
#[derive(Clone)]
pub struct UrlValidator {
    resolver: Arc<dyn HostResolver>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new(Arc::new(SystemResolver))
    }
}

impl std::fmt::Debug for UrlValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlValidator").finish_non_exhaustive()
    }
}

impl UrlValidator {
    /// Create a validator that resolves hostnames through `resolver`
    pub fn new(resolver: Arc<dyn HostResolver>) -> Self {
        Self { resolver }
    }

    /// Validate `raw` and return the accepted URL or the reason it was refused
    pub async fn validate(&self, raw: &str) -> Result<ValidatedUrl, ValidationError> {
        let result = self.check(raw).await;
        match &result {
            Ok(validated) => debug!(
                url = %validated.as_str(),
                addresses = ?validated.addresses(),
                "URL accepted"
            ),
            Err(e) => warn!(url = raw, kind = e.kind(), reason = %e, "URL rejected"),
        }
        result
    }

    async fn check(&self, raw: &str) -> Result<ValidatedUrl, ValidationError> {
        let url = Url::parse(raw).map_err(|e| match e {
            ParseError::RelativeUrlWithoutBase => ValidationError::DisallowedScheme(None),
            ParseError::EmptyHost => ValidationError::MissingHostname,
            other @ (ParseError::IdnaError | ParseError::InvalidDomainCharacter) => {
                match authority_host(raw) {
                    Some(host) if host.chars().any(char::is_whitespace) => {
                        ValidationError::InvalidHostname(host.to_string())
                    }
                    _ => ValidationError::Malformed(other),
                }
            }
            other => ValidationError::Malformed(other),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => return Err(ValidationError::DisallowedScheme(Some(scheme.to_string()))),
        }

        let host = url.host().ok_or(ValidationError::MissingHostname)?;
        let addresses = match host {
            Host::Ipv4(ip) => vec![IpAddr::V4(ip)],
            Host::Ipv6(ip) => vec![IpAddr::V6(ip)],
            Host::Domain(domain) => {
                if domain.is_empty() {
                    return Err(ValidationError::MissingHostname);
                }
                self.resolve(domain, url.port_or_known_default().unwrap_or(80))
                    .await?
            }
        };

        let host_name = url.host_str().unwrap_or_default();
        for ip in &addresses {
            if let Some(class) = classify(ip) {
                return Err(ValidationError::DisallowedAddress {
                    host: host_name.to_string(),
                    ip: *ip,
                    class,
                });
            }
        }

        Ok(ValidatedUrl { url, addresses })
    }

    async fn resolve(&self, domain: &str, port: u16) -> Result<Vec<IpAddr>, ValidationError> {
        match self.resolver.lookup(domain, port).await {
            Ok(addresses) if !addresses.is_empty() => Ok(addresses),
            Ok(_) => Err(ValidationError::ResolutionFailed {
                host: domain.to_string(),
                source: None,
            }),
            Err(e) => Err(ValidationError::ResolutionFailed {
                host: domain.to_string(),
                source: Some(e),
            }),
        }
    }
}

/// Host part of the raw authority, before the URL parser rewrites or rejects it
fn authority_host(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("://")?;
    let authority = rest.split(['/', '\\', '?', '#']).next()?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    Some(host.rsplit_once(':').map_or(host, |(host, _)| host))
}
