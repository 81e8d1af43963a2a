//! Error taxonomy shared by the supervisor and the hosts entry manager.
//!
//! Every variant carries enough context for the CLI to print a remediation
//! hint; none of them abort the process on their own.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("entry point '{}' not found; nothing to serve", .0.display())]
    MissingEntryPoint(PathBuf),

    #[error("failed to launch server runtime: {0}")]
    LaunchFailed(String),

    #[error("pid file '{}' does not hold a pid: {reason}", .path.display())]
    CorruptMarker { path: PathBuf, reason: String },

    #[error(
        "could not write '{}': {source}; re-run with administrator/sudo privileges",
        .path.display()
    )]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read '{}': {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to terminate pid {pid}: {source}; stop it manually (kill {pid})")]
    TerminateFailed {
        pid: u32,
        #[source]
        source: io::Error,
    },

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
