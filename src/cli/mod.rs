//! CLI module for session-svc
//!
//! Without a subcommand the transport comes from configuration
//! (`SERVER_TYPE` or `server.transport`).

pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::Transport;

/// Session store service over HTTP or gRPC
#[derive(Parser)]
#[command(name = "session-svc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the configured transport
    Serve,

    /// Serve the HTTP API
    Http,

    /// Serve the gRPC API
    Grpc,
}

impl Command {
    /// Transport forced by the subcommand, if any
    pub fn transport(self) -> Option<Transport> {
        match self {
            Command::Serve => None,
            Command::Http => Some(Transport::Http),
            Command::Grpc => Some(Transport::Grpc),
        }
    }
}
