//! Rejection reasons produced by the URL validator

use super::address::AddressClass;
use std::net::IpAddr;
use thiserror::Error;

/// Why a URL was refused. The `Display` text is the reason reported to callers.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The string is not a URL
    #[error("URL parse error: {0}")]
    Malformed(#[source] url::ParseError),

    /// Anything other than `http`/`https`, including no scheme at all
    #[error("URL scheme must be http or https")]
    DisallowedScheme(Option<String>),

    #[error("URL missing hostname")]
    MissingHostname,

    /// Host contains whitespace
    #[error("Invalid hostname")]
    InvalidHostname(String),

    /// Lookup failed or returned nothing
    #[error("Hostname resolution failed")]
    ResolutionFailed {
        host: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// At least one resolved address is not publicly routable
    #[error("Resolved IP {ip} is private/loopback/link-local/multicast/unspecified")]
    DisallowedAddress {
        host: String,
        ip: IpAddr,
        class: AddressClass,
    },
}

impl ValidationError {
    /// Short machine-readable kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Malformed(_) => "malformed_input",
            ValidationError::DisallowedScheme(_) => "disallowed_scheme",
            ValidationError::MissingHostname | ValidationError::InvalidHostname(_) => {
                "missing_hostname"
            }
            ValidationError::ResolutionFailed { .. } => "resolution_failure",
            ValidationError::DisallowedAddress { .. } => "disallowed_address",
        }
    }
}
