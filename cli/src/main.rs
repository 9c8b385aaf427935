use clap::{Parser, Subcommand};

mod der;
mod error;
mod output;
mod pkcs12;
mod utils;

use error::Result;

use der::DerCommands;
use pkcs12::Pkcs12Commands;

#[derive(Parser)]
#[command(name = "hako")]
#[command(about = "DER and PKCS#12 inspection toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// DER encoding operations
    Der {
        #[command(subcommand)]
        command: DerCommands,
    },
    /// PKCS#12 operations
    Pkcs12 {
        #[command(subcommand)]
        command: Pkcs12Commands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Der { command } => match command {
            DerCommands::Dump { config } => {
                der::dump::execute(config)?;
            }
            DerCommands::Tree { config } => {
                der::tree::execute(config)?;
            }
        },
        Commands::Pkcs12 { command } => match command {
            Pkcs12Commands::Inspect { config } => {
                pkcs12::inspect::execute(config)?;
            }
        },
    }

    Ok(())
}
