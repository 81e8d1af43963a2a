//! Server supervision: start, foreground wait, marker-based stop.
//!
//! The pid file is the only durable state. Its presence means "a server was
//! started by this tool and may still be running"; liveness is always
//! re-checked before acting on it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::thread;
use std::time::Duration;

use crate::config::Settings;
use crate::error::Error;
use crate::interrupt::CancelToken;
use crate::platform::Platform;

/// How often the foreground wait probes the child.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Wait between the graceful signal and the forced one.
const GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Live handle to a server started by this invocation.
#[derive(Debug)]
pub struct ServerHandle {
    child: Child,
}

impl ServerHandle {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }
}

/// How the foreground wait ended.
#[derive(Debug)]
pub enum WaitOutcome {
    /// The server exited on its own with the given status.
    Exited(std::process::ExitStatus),
    /// The cancel token fired; the server is still running.
    Interrupted,
}

/// Result of a marker-based stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The server was signalled down; `forced` when SIGTERM was not enough.
    Stopped { pid: u32, forced: bool },
    /// The recorded pid was not running; stale marker cleaned up.
    AlreadyGone(u32),
    /// No pid file exists; nothing was started or it was stopped already.
    NoMarker,
}

/// Supervises exactly one child server process.
pub struct ServerSupervisor {
    pid_file: PathBuf,
    entry_point: PathBuf,
    runtime: String,
    platform: Box<dyn Platform>,
}

impl ServerSupervisor {
    pub fn new(settings: &Settings, platform: Box<dyn Platform>) -> Self {
        Self {
            pid_file: settings.pid_file.clone(),
            entry_point: settings.entry_point.clone(),
            runtime: settings.runtime.clone(),
            platform,
        }
    }

    pub fn pid_file(&self) -> &Path {
        &self.pid_file
    }

    /// Whether the server runtime can be invoked at all.
    pub fn runtime_available(&self) -> bool {
        Command::new(&self.runtime)
            .arg("--version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Launch the server on all interfaces at `port`, serving `doc_root`,
    /// and persist its pid to the marker file.
    ///
    /// The child inherits stdout/stderr so its request log stays visible.
    /// A marker write failure downgrades to a warning: the server is running
    /// either way.
    pub fn start(&self, port: u16, doc_root: &Path) -> Result<ServerHandle, Error> {
        let entry = doc_root.join(&self.entry_point);
        if !entry.is_file() {
            return Err(Error::MissingEntryPoint(entry));
        }

        if port < 1024 && !self.platform.has_elevated_privilege() {
            eprintln!("Warning: port {port} is a privileged port;");
            eprintln!("         binding it may require administrator/sudo privileges");
        }

        let child = Command::new(&self.runtime)
            .arg("-S")
            .arg(format!("0.0.0.0:{port}"))
            .arg("-t")
            .arg(doc_root)
            .spawn()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    Error::LaunchFailed(format!("'{}' not found in PATH", self.runtime))
                } else {
                    Error::LaunchFailed(e.to_string())
                }
            })?;

        let pid = child.id();
        if let Err(e) = fs::write(&self.pid_file, pid.to_string()) {
            eprintln!(
                "Warning: could not write pid file {}: {e}",
                self.pid_file.display()
            );
            eprintln!("         if stop fails later, kill pid {pid} manually");
        }

        Ok(ServerHandle { child })
    }

    /// Block until the child exits or the token is cancelled, probing at a
    /// fixed interval. This is the one suspension point in the tool.
    pub fn await_termination(
        &self,
        handle: &mut ServerHandle,
        cancel: &CancelToken,
    ) -> Result<WaitOutcome, Error> {
        loop {
            if let Some(status) = handle.child.try_wait()? {
                return Ok(WaitOutcome::Exited(status));
            }
            if cancel.is_cancelled() {
                return Ok(WaitOutcome::Interrupted);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Stop the server recorded in the marker file: graceful signal, grace
    /// period, forced signal if still alive. A pid that is already gone is
    /// success. The marker is deleted on any confirmed stop and kept when
    /// termination errors out, for manual inspection.
    pub fn stop(&self) -> Result<StopOutcome, Error> {
        if !self.pid_file.is_file() {
            return Ok(StopOutcome::NoMarker);
        }

        let raw = fs::read_to_string(&self.pid_file).map_err(|e| Error::CorruptMarker {
            path: self.pid_file.clone(),
            reason: e.to_string(),
        })?;
        let pid: u32 = raw.trim().parse().map_err(|_| Error::CorruptMarker {
            path: self.pid_file.clone(),
            reason: format!("expected a decimal pid, got {:?}", raw.trim()),
        })?;
        // A pid outside the positive i32 range would wrap in the kill(2)
        // call; -1 signals every process the user may signal and 0 signals
        // the whole process group. Never let such a marker near a signal.
        if pid == 0 || i32::try_from(pid).is_err() {
            return Err(Error::CorruptMarker {
                path: self.pid_file.clone(),
                reason: format!("pid {pid} is outside the valid pid range"),
            });
        }

        let outcome = if !signal_stop(pid, false).map_err(|e| Error::TerminateFailed {
            pid,
            source: e,
        })? {
            StopOutcome::AlreadyGone(pid)
        } else {
            thread::sleep(GRACE_PERIOD);
            if is_pid_alive(pid) {
                // One escalation only: SIGTERM -> SIGKILL.
                signal_stop(pid, true).map_err(|e| Error::TerminateFailed { pid, source: e })?;
                StopOutcome::Stopped { pid, forced: true }
            } else {
                StopOutcome::Stopped { pid, forced: false }
            }
        };

        if let Err(e) = fs::remove_file(&self.pid_file) {
            eprintln!(
                "Warning: could not remove pid file {}: {e}",
                self.pid_file.display()
            );
        }
        Ok(outcome)
    }
}

/// Check if a pid is alive (Unix: kill -0). Pids that do not fit a positive
/// i32 cannot name a process and read as dead.
#[cfg(unix)]
pub fn is_pid_alive(pid: u32) -> bool {
    let Ok(pid) = i32::try_from(pid) else {
        return false;
    };
    if pid == 0 {
        return false;
    }
    unsafe { libc::kill(pid, 0) == 0 }
}

#[cfg(windows)]
pub fn is_pid_alive(pid: u32) -> bool {
    let output = Command::new("tasklist")
        .args(["/FI", &format!("PID eq {pid}"), "/NH", "/FO", "CSV"])
        .output();
    match output {
        Ok(out) => String::from_utf8_lossy(&out.stdout).contains(&format!("\"{pid}\"")),
        Err(_) => false,
    }
}

#[cfg(not(any(unix, windows)))]
pub fn is_pid_alive(_pid: u32) -> bool {
    false
}

/// Send a termination signal. Returns Ok(false) when no such process exists
/// (already stopped, which callers treat as success).
#[cfg(unix)]
fn signal_stop(pid: u32, force: bool) -> io::Result<bool> {
    // Out-of-range pids would wrap to -1/0 and signal far more than one
    // process; treat them as already gone.
    let Ok(pid) = i32::try_from(pid) else {
        return Ok(false);
    };
    if pid == 0 {
        return Ok(false);
    }
    let sig = if force { libc::SIGKILL } else { libc::SIGTERM };
    if unsafe { libc::kill(pid, sig) } == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        Ok(false)
    } else {
        Err(err)
    }
}

#[cfg(windows)]
fn signal_stop(pid: u32, force: bool) -> io::Result<bool> {
    let mut cmd = Command::new("taskkill");
    if force {
        cmd.arg("/F");
    }
    let out = cmd.args(["/PID", &pid.to_string()]).output()?;
    if out.status.success() {
        return Ok(true);
    }
    // taskkill exits with 128 when no process has that pid.
    if out.status.code() == Some(128) {
        return Ok(false);
    }
    // Console processes (php -S included) refuse the graceful request with
    // "can only be terminated forcefully" (exit code 1). Report still-alive
    // so the caller escalates to /F after the grace period.
    if !force {
        return Ok(true);
    }
    Err(io::Error::other(
        String::from_utf8_lossy(&out.stderr).trim().to_string(),
    ))
}

#[cfg(not(any(unix, windows)))]
fn signal_stop(_pid: u32, _force: bool) -> io::Result<bool> {
    Err(io::Error::other("process signalling not supported on this platform"))
}
