//! CLI definitions and command orchestration.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::io::Write;

use crate::config::{Settings, DEFAULT_PORT};
use crate::hosts::{AddOutcome, HostsEntryManager, RemoveOutcome};
use crate::interrupt::{self, CancelToken};
use crate::server::{ServerSupervisor, StopOutcome, WaitOutcome};

#[derive(Parser)]
#[command(name = "actsrv")]
#[command(about = "Manage the local activation endpoint server and its hosts override")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the server and configure the hosts override
    Start {
        /// Port for the server
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Skip hosts file modification
        #[arg(long)]
        no_hosts: bool,
    },
    /// Stop a previously started server and revert the hosts override
    Stop {
        /// Skip hosts file modification (revert)
        #[arg(long)]
        no_hosts: bool,
    },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::default();

    match cli.command {
        Some(Commands::Start { port, no_hosts }) => cmd_start(&settings, port, no_hosts),
        Some(Commands::Stop { no_hosts }) => cmd_stop(&settings, no_hosts),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn cmd_start(settings: &Settings, port: u16, no_hosts: bool) -> Result<()> {
    let supervisor = ServerSupervisor::new(settings, crate::platform::native()?);
    if !supervisor.runtime_available() {
        anyhow::bail!(
            "'{}' runtime not found in PATH; install it and try again",
            settings.runtime
        );
    }

    let hosts = hosts_manager(settings, no_hosts)?;
    if let Some(h) = &hosts {
        offer_hosts_add(h)?;
    }

    let mut handle = match supervisor.start(port, &settings.doc_root) {
        Ok(h) => h,
        Err(e) => {
            // Best-effort revert so a failed start does not leave the
            // override pointing at nothing.
            if let Some(h) = &hosts {
                if h.is_present() {
                    println!("Reverting hosts entry after failed start...");
                    let _ = h.remove();
                }
            }
            return Err(e.into());
        }
    };

    println!(
        "Server started (pid={}, port={port}); press Ctrl+C to stop",
        handle.pid()
    );

    let cancel = CancelToken::new();
    interrupt::install(&cancel);

    match supervisor.await_termination(&mut handle, &cancel)? {
        WaitOutcome::Exited(status) => {
            println!("Server exited on its own ({status})");
        }
        WaitOutcome::Interrupted => {
            println!("\nInterrupt received; stopping server...");
            report_stop(supervisor.stop());
        }
    }

    if let Some(h) = &hosts {
        offer_hosts_remove(h);
    }
    println!("Shutdown complete");
    Ok(())
}

fn cmd_stop(settings: &Settings, no_hosts: bool) -> Result<()> {
    let supervisor = ServerSupervisor::new(settings, crate::platform::native()?);
    report_stop(supervisor.stop());

    if let Some(h) = &hosts_manager(settings, no_hosts)? {
        offer_hosts_remove(h);
    }
    Ok(())
}

fn hosts_manager(settings: &Settings, no_hosts: bool) -> Result<Option<HostsEntryManager>> {
    if no_hosts {
        println!("Skipping hosts file modification (--no-hosts)");
        return Ok(None);
    }
    Ok(Some(HostsEntryManager::native(settings.hosts_entry.clone())?))
}

/// Ask the operator before touching the hosts file. A failed add after the
/// operator said yes is fatal; declining only prints the consequence.
fn offer_hosts_add(hosts: &HostsEntryManager) -> Result<()> {
    if hosts.is_present() {
        println!("Hosts entry '{}' is already present", hosts.entry());
        return Ok(());
    }
    println!("The hosts entry '{}' is not present", hosts.entry());
    if !confirm("Add it now? This usually requires admin/sudo privileges.") {
        println!("Skipping hosts entry; the server will not be reachable via its hostname");
        return Ok(());
    }
    match hosts.add()? {
        AddOutcome::Added => {
            println!("Added '{}' to {}", hosts.entry(), hosts.path().display())
        }
        AddOutcome::AlreadyPresent => {
            println!("Hosts entry '{}' is already present", hosts.entry())
        }
    }
    Ok(())
}

/// Removal is always advisory: a failure here warns instead of erroring so
/// the rest of shutdown still runs.
fn offer_hosts_remove(hosts: &HostsEntryManager) {
    if !hosts.is_present() {
        println!("Hosts entry '{}' is not present, no removal needed", hosts.entry());
        return;
    }
    println!("The hosts entry '{}' is present", hosts.entry());
    if !confirm("Remove it now? This usually requires admin/sudo privileges.") {
        println!("Keeping hosts entry; remember to remove it manually later");
        return;
    }
    match hosts.remove() {
        Ok(RemoveOutcome::Removed) => {
            println!("Removed '{}' from {}", hosts.entry(), hosts.path().display())
        }
        Ok(RemoveOutcome::NotPresent) => {
            println!("Hosts entry '{}' is not present, no removal needed", hosts.entry())
        }
        Ok(RemoveOutcome::CommentedOnly) => {
            println!("Entry only appears in commented lines; nothing was removed")
        }
        Err(e) => {
            eprintln!("Warning: failed to remove hosts entry: {e}");
            eprintln!("         remove it manually from {}", hosts.path().display());
        }
    }
}

fn report_stop(result: std::result::Result<StopOutcome, crate::error::Error>) {
    match result {
        Ok(StopOutcome::Stopped { pid, forced: false }) => {
            println!("Server stopped (pid={pid})")
        }
        Ok(StopOutcome::Stopped { pid, forced: true }) => {
            println!("Server did not exit within the grace period; force-killed pid {pid}")
        }
        Ok(StopOutcome::AlreadyGone(pid)) => {
            println!("Process {pid} was not running; cleaned up stale pid file")
        }
        Ok(StopOutcome::NoMarker) => {
            println!("No pid file found; server is not running or was not started by this tool")
        }
        Err(e) => {
            eprintln!("Warning: server may not have stopped cleanly: {e}");
        }
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim().eq_ignore_ascii_case("y")
}
