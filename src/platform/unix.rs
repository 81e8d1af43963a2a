//! Unix (macOS, Linux) platform implementation.

use std::io;
use std::path::PathBuf;

use super::Platform;

pub struct UnixPlatform;

impl Platform for UnixPlatform {
    fn hosts_path(&self) -> PathBuf {
        PathBuf::from("/etc/hosts")
    }

    fn has_elevated_privilege(&self) -> bool {
        unsafe { libc::geteuid() == 0 }
    }

    fn flush_resolver_cache(&self) -> io::Result<()> {
        #[cfg(target_os = "macos")]
        {
            use std::process::Command;

            let status = Command::new("dscacheutil").arg("-flushcache").status()?;
            if !status.success() {
                return Err(io::Error::other("dscacheutil -flushcache failed"));
            }
            // mDNSResponder keeps its own cache; ignore failures, the
            // dscacheutil flush already covers the common case.
            let _ = Command::new("killall").args(["-HUP", "mDNSResponder"]).status();
            Ok(())
        }

        #[cfg(not(target_os = "macos"))]
        {
            // Linux resolvers pick up /etc/hosts edits directly unless a
            // caching daemon (nscd, systemd-resolved) sits in front; nothing
            // portable to run here.
            Ok(())
        }
    }
}
