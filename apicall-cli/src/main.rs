//! Binary crate for the `apicall` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading `.env` and setting up logging
//! - Interactive credential configuration

use clap::Parser;

mod cli;
mod configure;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose);
    cmd.run().await
}
