//! External fetch tool invocation

use super::types::{FetchError, FetchOutput};
use crate::config::FetchConfig;
use crate::core::ssrf::ValidatedUrl;
use async_trait::async_trait;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Anything that can turn a validated URL into captured tool output
#[async_trait]
pub trait FetchTool: Send + Sync {
    async fn fetch(&self, url: &ValidatedUrl) -> Result<FetchOutput, FetchError>;
}

/// Runs `<program> [args...] <url>` as a child process, without a shell
#[derive(Debug, Clone)]
pub struct FetchDispatcher {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl FetchDispatcher {
    /// Create a dispatcher for `program` with no extra arguments
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout,
        }
    }

    /// Build a dispatcher from the `fetch` config section
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            program: config.tool.clone(),
            args: config.args.clone(),
            timeout: config.timeout(),
        }
    }

    /// Arguments placed before the URL
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the tool against `url`.
    ///
    /// The timeout covers the process and both output pipes. On expiry the
    /// tool's whole process group is killed and the child reaped before
    /// returning, so nothing it started outlives the request.
    pub async fn run(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let started = Instant::now();

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn().map_err(|source| FetchError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let pid = child.id();
        let mut group = ProcessGroup::new(pid);
        debug!(program = %self.program, pid = ?pid, "fetch tool started");

        let mut stdout_task = spawn_reader(child.stdout.take());
        let mut stderr_task = spawn_reader(child.stderr.take());

        let completion = async {
            let status = child.wait().await?;
            let stdout = collect(&mut stdout_task).await?;
            let stderr = collect(&mut stderr_task).await?;
            Ok::<_, FetchError>((status, stdout, stderr))
        };
        let outcome = tokio::time::timeout(self.timeout, completion).await;

        let (status, stdout, stderr) = match outcome {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    program = %self.program,
                    pid = ?pid,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "fetch tool timed out, killing"
                );
                group.kill();
                // The leader may already have exited while its descendants held the pipes
                if !matches!(child.try_wait(), Ok(Some(_))) {
                    if let Err(e) = child.kill().await {
                        warn!(error = %e, "failed to kill fetch tool");
                    }
                }
                stdout_task.abort();
                stderr_task.abort();
                return Err(FetchError::Timeout(self.timeout));
            }
        };
        group.release();

        let returncode = exit_code(status);
        info!(
            program = %self.program,
            returncode,
            stdout_bytes = stdout.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetch tool finished"
        );

        Ok(FetchOutput {
            returncode,
            stdout,
            stderr,
        })
    }
}

/// Process group led by the spawned tool. Killed on drop unless released,
/// which also covers a request future that is cancelled mid-fetch.
struct ProcessGroup {
    pgid: Option<u32>,
}

impl ProcessGroup {
    fn new(pgid: Option<u32>) -> Self {
        Self { pgid }
    }

    fn kill(&mut self) {
        if let Some(pgid) = self.pgid.take() {
            kill_group(pgid);
        }
    }

    /// The tool finished normally; leave the group alone
    fn release(&mut self) {
        self.pgid = None;
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(unix)]
fn kill_group(pgid: u32) {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pgid) else {
        return;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => warn!(pgid, error = %e, "failed to kill fetch tool process group"),
    }
}

#[cfg(not(unix))]
fn kill_group(_pgid: u32) {}

#[async_trait]
impl FetchTool for FetchDispatcher {
    async fn fetch(&self, url: &ValidatedUrl) -> Result<FetchOutput, FetchError> {
        self.run(url.as_str()).await
    }
}

fn spawn_reader<R>(stream: Option<R>) -> JoinHandle<io::Result<Vec<u8>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            stream.read_to_end(&mut buf).await?;
        }
        Ok(buf)
    })
}

async fn collect(task: &mut JoinHandle<io::Result<Vec<u8>>>) -> Result<String, FetchError> {
    let bytes = task.await.map_err(io::Error::other)??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
