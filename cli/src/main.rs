mod commands;
mod terminal;

use commands::{CommandLine, Commands, info, scan};
use portsweep_common::config::ScanConfig;
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.log_level())?;

    let outcome: anyhow::Result<()> = match commands.command {
        Commands::Info => {
            print::header("about the tool");
            info::info(&ScanConfig::default());
            Ok(())
        }
        Commands::Scan(args) => scan::scan(args).await,
    };

    if let Err(e) = outcome {
        error!("{e:#}");
        std::process::exit(1);
    }
    Ok(())
}
