//! Fetch dispatch
//!
//! Hands a validated URL to the configured external tool and captures what it prints.

mod dispatcher;
mod types;

pub use dispatcher::{FetchDispatcher, FetchTool};
pub use types::{FetchError, FetchOutput};
