use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tasa::core::conversion::Direction;
use tasa::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tasa::AppCommand {
    fn from(cmd: Commands) -> tasa::AppCommand {
        match cmd {
            Commands::Status => tasa::AppCommand::Status,
            Commands::Rate => tasa::AppCommand::Rate,
            Commands::Quote => tasa::AppCommand::Quote,
            Commands::Convert { amount, reverse } => tasa::AppCommand::Convert {
                amount,
                direction: if reverse {
                    Direction::ToSource
                } else {
                    Direction::ToTarget
                },
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the quote of the day and today's BCV rate
    Status,
    /// Display the value of 1 USD in bolívares
    Rate,
    /// Convert an amount from USD to VES (or VES to USD with --reverse)
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Convert from VES to USD
        #[arg(short, long)]
        reverse: bool,
    },
    /// Display the motivational quote of the day
    Quote,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => tasa::cli::setup::setup(),
        Some(cmd) => tasa::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
