//! Windows platform implementation.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::Platform;

pub struct WindowsPlatform;

impl Platform for WindowsPlatform {
    fn hosts_path(&self) -> PathBuf {
        let root = std::env::var_os("SystemRoot")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(r"C:\Windows"));
        root.join(r"System32\drivers\etc\hosts")
    }

    fn has_elevated_privilege(&self) -> bool {
        // `net session` only succeeds from an elevated shell.
        Command::new("net")
            .arg("session")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn flush_resolver_cache(&self) -> io::Result<()> {
        let status = Command::new("ipconfig")
            .arg("/flushdns")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if !status.success() {
            return Err(io::Error::other("ipconfig /flushdns failed"));
        }
        Ok(())
    }
}
