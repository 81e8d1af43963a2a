//! Commented lines never count as present and are never removed.

mod common;

use actsrv::hosts::{AddOutcome, HostsEntryManager, RemoveOutcome};
use std::fs;

const ENTRY: &str = "127.0.0.1 albert.apple.com";

#[test]
fn commented_entry_counts_as_absent_and_add_keeps_it() {
    let dir = common::temp_dir();
    let hosts_path = dir.path().join("hosts");
    fs::write(
        &hosts_path,
        "1.2.3.4 other.host\n# 127.0.0.1 albert.apple.com\n",
    )
    .unwrap();

    let manager = HostsEntryManager::at_path(&hosts_path, ENTRY);
    assert!(!manager.is_present(), "commented line must not count");

    assert_eq!(manager.add().unwrap(), AddOutcome::Added);

    let content = fs::read_to_string(&hosts_path).unwrap();
    let lines: Vec<&str> = content.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(
        lines,
        vec![
            "1.2.3.4 other.host",
            "# 127.0.0.1 albert.apple.com",
            "127.0.0.1 albert.apple.com",
        ]
    );
    assert!(manager.is_present());
}

#[test]
fn remove_leaves_commented_copy_untouched() {
    let dir = common::temp_dir();
    let hosts_path = dir.path().join("hosts");
    fs::write(
        &hosts_path,
        "# 127.0.0.1 albert.apple.com\n127.0.0.1 albert.apple.com\n1.2.3.4 other.host\n",
    )
    .unwrap();

    let manager = HostsEntryManager::at_path(&hosts_path, ENTRY);
    assert_eq!(manager.remove().unwrap(), RemoveOutcome::Removed);

    let content = fs::read_to_string(&hosts_path).unwrap();
    assert_eq!(
        content,
        "# 127.0.0.1 albert.apple.com\n1.2.3.4 other.host\n"
    );
    assert!(!manager.is_present());
}

#[test]
fn remove_with_only_commented_copy_is_byte_identical_noop() {
    let dir = common::temp_dir();
    let hosts_path = dir.path().join("hosts");
    let original = "1.2.3.4 other.host\n  # 127.0.0.1 albert.apple.com\n";
    fs::write(&hosts_path, original).unwrap();

    let manager = HostsEntryManager::at_path(&hosts_path, ENTRY);
    assert_eq!(manager.remove().unwrap(), RemoveOutcome::NotPresent);
    assert_eq!(fs::read_to_string(&hosts_path).unwrap(), original);
}

#[test]
fn indented_comment_is_still_a_comment() {
    let dir = common::temp_dir();
    let hosts_path = dir.path().join("hosts");
    fs::write(&hosts_path, "   # 127.0.0.1 albert.apple.com\n").unwrap();

    let manager = HostsEntryManager::at_path(&hosts_path, ENTRY);
    assert!(!manager.is_present());
}
