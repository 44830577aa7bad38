//! SSRF protection
//!
//! This module decides whether a caller-supplied URL may be fetched:
//! - `address`: classification of private/loopback/link-local/multicast/unspecified ranges
//! - `resolver`: hostname resolution seam
//! - `validator`: the accept/reject pipeline

pub mod address;
mod error;
pub mod resolver;
pub mod validator;

pub use address::{AddressClass, classify, is_public};
pub use error::ValidationError;
pub use resolver::{HostResolver, SystemResolver};
pub use validator::{UrlValidator, ValidatedUrl};
