//! `marquee-remove` entry point.

use clap::Parser;

use marquee_cli::commands::remove::{self, RemoveArgs};

#[tokio::main]
async fn main() {
    let args = RemoveArgs::parse();
    if let Err(e) = remove::run(&args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
