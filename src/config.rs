//! Fixed configuration for the managed server and the hosts override.
//!
//! All constants live in one injectable struct so tests can point both
//! components at isolated temp paths.

use std::path::{Path, PathBuf};

/// Default port the activation endpoint is served on.
pub const DEFAULT_PORT: u16 = 80;

/// Settings shared by the supervisor and the hosts entry manager.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Literal hosts line mapping the activation hostname to loopback.
    pub hosts_entry: String,
    /// Marker file holding the pid of the most recently started server.
    pub pid_file: PathBuf,
    /// Directory served by the runtime.
    pub doc_root: PathBuf,
    /// File that must exist under doc_root before a start is attempted.
    pub entry_point: PathBuf,
    /// Executable used to serve doc_root.
    pub runtime: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hosts_entry: "127.0.0.1 albert.apple.com".to_string(),
            pid_file: PathBuf::from(".actsrv.pid"),
            doc_root: PathBuf::from("."),
            entry_point: PathBuf::from("activator.php"),
            runtime: "php".to_string(),
        }
    }
}

impl Settings {
    /// Settings rooted in the given directory (e.g. a temp dir in tests).
    pub fn rooted(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            pid_file: base.join("server.pid"),
            doc_root: base.to_path_buf(),
            ..Self::default()
        }
    }
}
