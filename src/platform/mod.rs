//! Platform abstraction for the hosts file path, privilege probing and
//! resolver cache flushing.

use std::io;
use std::path::PathBuf;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

use crate::error::Error;

/// Platform-specific capabilities the rest of the system depends on.
pub trait Platform: Send + Sync {
    /// Well-known path of the host-resolution override file.
    fn hosts_path(&self) -> PathBuf;
    /// Whether the current user runs with administrator/superuser rights.
    fn has_elevated_privilege(&self) -> bool;
    /// Best-effort flush of the system resolver cache.
    fn flush_resolver_cache(&self) -> io::Result<()>;
}

/// Get the Platform implementation for the current OS.
pub fn native() -> Result<Box<dyn Platform>, Error> {
    #[cfg(unix)]
    return Ok(Box::new(unix::UnixPlatform));

    #[cfg(windows)]
    return Ok(Box::new(windows::WindowsPlatform));

    #[cfg(not(any(unix, windows)))]
    Err(Error::UnsupportedPlatform(std::env::consts::OS.to_string()))
}
