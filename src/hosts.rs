//! Idempotent management of one override entry in the hosts file.
//!
//! The hosts file is shared, externally-owned state: every line except the
//! one managed entry must survive add/remove byte-for-byte and in order.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::platform::Platform;

/// Result of an add: either the entry was appended or it was already there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Result of a remove. `CommentedOnly` means matching lines existed but all
/// of them were commented out, so nothing was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
    CommentedOnly,
}

/// Manages the presence of one literal entry line in the hosts file.
pub struct HostsEntryManager {
    path: PathBuf,
    entry: String,
    platform: Option<Box<dyn Platform>>,
}

/// A line counts as an active match only if it contains the entry text and
/// is not commented out.
fn is_active_match(line: &str, entry: &str) -> bool {
    line.contains(entry) && !line.trim_start().starts_with('#')
}

impl HostsEntryManager {
    /// Manager for the platform's hosts file, flushing the resolver cache
    /// after modifications.
    pub fn native(entry: impl Into<String>) -> Result<Self, Error> {
        let platform = crate::platform::native()?;
        Ok(Self {
            path: platform.hosts_path(),
            entry: entry.into(),
            platform: Some(platform),
        })
    }

    /// Manager over an explicit file, with no cache flushing (for tests).
    pub fn at_path(path: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            entry: entry.into(),
            platform: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Whether the entry is present as an active (uncommented) line.
    ///
    /// Read failures warn and report absent; a missing hosts file is called
    /// out separately because it is unexpected on every supported platform.
    pub fn is_present(&self) -> bool {
        let file = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                eprintln!(
                    "Warning: hosts file not found at {} (this is unexpected)",
                    self.path.display()
                );
                return false;
            }
            Err(e) => {
                eprintln!("Warning: could not read {}: {e}", self.path.display());
                return false;
            }
        };
        for line in BufReader::new(file).lines() {
            match line {
                Ok(line) => {
                    if is_active_match(&line, &self.entry) {
                        return true;
                    }
                }
                Err(e) => {
                    eprintln!(
                        "Warning: error while reading {}: {e}",
                        self.path.display()
                    );
                    return false;
                }
            }
        }
        false
    }

    /// Append the entry unless an active copy already exists.
    pub fn add(&self) -> Result<AddOutcome, Error> {
        if self.is_present() {
            return Ok(AddOutcome::AlreadyPresent);
        }
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::WriteFailed {
                path: self.path.clone(),
                source: e,
            })?;
        file.write_all(format!("\n{}\n", self.entry).as_bytes())
            .map_err(|e| Error::WriteFailed {
                path: self.path.clone(),
                source: e,
            })?;
        self.flush_cache();
        Ok(AddOutcome::Added)
    }

    /// Remove every active line matching the entry, leaving all other lines
    /// (comments included) untouched.
    pub fn remove(&self) -> Result<RemoveOutcome, Error> {
        if !self.is_present() {
            return Ok(RemoveOutcome::NotPresent);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| Error::ReadFailed {
            path: self.path.clone(),
            source: e,
        })?;

        let mut kept = String::with_capacity(content.len());
        let mut removed = 0usize;
        for line in content.split_inclusive('\n') {
            if is_active_match(line, &self.entry) {
                removed += 1;
            } else {
                kept.push_str(line);
            }
        }

        // Presence check passed but only commented copies survive the line
        // scan: the file changed underneath us or the match was a comment.
        // Leave it alone rather than rewrite a file we would not change.
        if removed == 0 {
            return Ok(RemoveOutcome::CommentedOnly);
        }

        fs::write(&self.path, kept).map_err(|e| Error::WriteFailed {
            path: self.path.clone(),
            source: e,
        })?;
        self.flush_cache();
        Ok(RemoveOutcome::Removed)
    }

    fn flush_cache(&self) {
        let Some(platform) = &self.platform else { return };
        if let Err(e) = platform.flush_resolver_cache() {
            eprintln!("Warning: could not flush the resolver cache: {e}");
            eprintln!("         a reboot or manual flush may be needed before the override applies");
        }
    }
}
