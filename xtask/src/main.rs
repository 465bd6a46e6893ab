#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;

use crate::handlers::{license, selftest};
use crate::models::args::{AppCommands, Cli};

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        AppCommands::Lic { company, days, hardware } => {
            license::generate_license(&company, days, hardware.as_deref())?;
        },
        AppCommands::Hwid {} => license::print_hardware_id(),
        AppCommands::Selftest {} => selftest::run_selftest()?,
    }

    Ok(())
}
