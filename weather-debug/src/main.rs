//! Debugging CLI for the weather gateway.
//!
//! Mirrors the server's timezone handling so clock and configuration
//! problems can be diagnosed without starting the full service.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
