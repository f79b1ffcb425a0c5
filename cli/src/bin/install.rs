//! `marquee-install` entry point.

use clap::Parser;

use marquee_cli::commands::install::{self, InstallArgs};

#[tokio::main]
async fn main() {
    let args = InstallArgs::parse();
    if let Err(e) = install::run(&args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
