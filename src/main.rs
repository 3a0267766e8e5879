use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

use cli::contact;

/// folio - portfolio contact form
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Send a message through the portfolio contact form", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and deliver one contact message
    Submit {
        /// Your name
        #[arg(long)]
        name: String,

        /// Address replies are sent to
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,

        #[arg(long, default_value = "", hide = true)]
        company: String,
    },
    /// Show when the last message was sent and the remaining cooldown
    Status,
    /// Clear the stored last sent timestamp
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = folio::Config::load(cli.config.clone())?;

    folio::observability::init_observability(
        "folio",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Submit {
            name,
            email,
            message,
            company,
        } => {
            contact::submit(
                config,
                contact::SubmitInput {
                    name,
                    email,
                    message,
                    company,
                },
            )
            .await
        }
        Commands::Status => contact::status(config).await,
        Commands::Reset => contact::reset(config).await,
    }
}
