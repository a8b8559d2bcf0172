mod annotate;
mod classification;
mod cli;
mod deserialise;
mod download;
mod error;
mod export;
mod geofence;
mod naming;
mod reading;
mod summary;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process(args) => match command::process(args).await {
            Ok(path) => println!("File saved to `{}`", path.display()),
            Err(e) => fail(e),
        },
        Commands::Fetch { url, dest } => match command::fetch(&url, dest).await {
            Ok(path) => println!("Archive extracted to `{}`", path.display()),
            Err(e) => fail(e),
        },
        Commands::CheckPoint { lat, lon } => {
            let verdict = if command::check_point(lat, lon) {
                "inside"
            } else {
                "outside"
            };
            println!("({}, {}) is {} PAR", lat, lon, verdict);
        }
        Commands::Classify {
            grade,
            wind,
            pressure,
        } => match command::classify(&grade, &wind, &pressure).label() {
            "" => println!("Unclassified"),
            label => println!("{}", label),
        },
    }

    Ok(())
}

fn fail(e: Error) -> ! {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
}
