//! # CLI Argument Definitions
//!
//! This module defines the command-line interface (CLI) structure using the
//! `clap` crate. It specifies the available subcommands, arguments, and
//! flags for the issuer tooling.

use clap::{Parser, Subcommand};

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cargo xtask")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Issuer toolkit for the Seatlock workspace")]
pub struct Cli {
    /// The main subcommand to execute.
    #[command(subcommand)]
    pub command: AppCommands,
}

/// Enumeration of available application subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Generate an armored license code
    Lic {
        /// The name of the customer (e.g., 'Acme Tooling GmbH')
        #[arg(short, long)]
        company: String,

        /// How many days from today the license remains valid
        #[arg(short, long, default_value_t = 365)]
        days: i64,

        /// Target machine fingerprint; defaults to this machine's
        #[arg(short = 'm', long)]
        hardware: Option<String>,
    },
    /// Print this machine's hardware fingerprint
    Hwid {},
    /// Exercise generate → decode → activate → inspect → deactivate end-to-end
    Selftest {},
}
