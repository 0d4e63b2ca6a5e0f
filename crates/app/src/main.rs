//! Tiffin Storefront CLI

use std::process;

use clap::Parser;
use tiffin_app::{config::StorefrontConfig, observability};

mod cli;

#[tokio::main]
pub async fn main() {
    StorefrontConfig::load_env();

    let cli = cli::Cli::parse();

    if let Err(error) = observability::init(&cli.config().logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
