//! Test fixtures

use async_trait::async_trait;
use fetch_gateway::config::{Config, ResponseFormat};
use fetch_gateway::server::{AppState, ServerBuilder};
use fetch_gateway::{FetchDispatcher, FetchError, FetchOutput, FetchTool, HostResolver, ValidatedUrl};
use std::collections::HashMap;
use std::io;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Resolver answering from a fixed table; unknown hosts fail like NXDOMAIN
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: &str, addresses: &[&str]) -> Self {
        let ips = addresses
            .iter()
            .map(|a| a.parse().expect("valid IP literal"))
            .collect();
        self.hosts.insert(host.to_string(), ips);
        self
    }

    /// Table used by most tests
    pub fn standard() -> Self {
        Self::new()
            .with_host("example.com", &["93.184.216.34", "2606:2800:220:1:248:1893:25c8:1946"])
            .with_host("public.test", &["8.8.8.8"])
            .with_host("internal.test", &["10.0.0.12"])
            .with_host("localhost.test", &["127.0.0.1"])
            .with_host("metadata.test", &["169.254.169.254"])
            .with_host("multicast.test", &["224.0.0.251"])
            .with_host("zero.test", &["0.0.0.0"])
            .with_host("mixed.test", &["8.8.8.8", "10.1.2.3"])
            .with_host("mixed-v6.test", &["8.8.8.8", "::1"])
            .with_host("empty.test", &[])
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn lookup(&self, host: &str, _port: u16) -> io::Result<Vec<IpAddr>> {
        self.hosts.get(host).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("failed to lookup address information: {}", host),
            )
        })
    }
}

/// Fetch tool that counts calls and returns a canned output
#[derive(Debug)]
pub struct RecordingFetchTool {
    calls: AtomicUsize,
    output: FetchOutput,
}

impl RecordingFetchTool {
    pub fn returning(returncode: i32, stdout: &str, stderr: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            output: FetchOutput {
                returncode,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FetchTool for RecordingFetchTool {
    async fn fetch(&self, _url: &ValidatedUrl) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.clone())
    }
}

/// Dispatcher running `sh -c <script> fetch <url>`, so the URL is `$1`
pub fn shell_dispatcher(script: &str, timeout: Duration) -> Arc<FetchDispatcher> {
    Arc::new(FetchDispatcher::new("sh", timeout).with_args(["-c", script, "fetch"]))
}

/// App state with the standard resolver table and the given fetch tool
pub fn test_app_state(format: ResponseFormat, fetcher: Arc<dyn FetchTool>) -> AppState {
    let mut config = Config::default();
    config.gateway.api.response_format = format;

    ServerBuilder::new()
        .with_config(config)
        .with_resolver(Arc::new(StaticResolver::standard()))
        .with_fetch_tool(fetcher)
        .build_state()
        .expect("valid test state")
}
