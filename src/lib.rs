//! actsrv - local activation endpoint server manager with hosts override.

pub mod cli;
pub mod config;
pub mod error;
pub mod hosts;
pub mod interrupt;
pub mod platform;
pub mod server;
