use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "kitchensink")]
#[command(about = "Kitchensink - membership client with OTP login and admin approval workflow", long_about = None)]
struct Cli {
    /// Log level filter (e.g. "info", "kitchensink=debug")
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an email OTP
    Login {
        /// Email address of the account
        email: String,
    },
    /// Discard the cached session
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// View and edit profiles
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Your own update requests
    Requests {
        #[command(subcommand)]
        action: commands::requests::RequestAction,
    },
    /// Admin console (user directory and moderation queue)
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Login { email } => commands::login::run(&email).await?,
        Commands::Logout => commands::login::logout()?,
        Commands::Whoami => commands::login::whoami()?,
        Commands::Profile { action } => commands::profile::run(action).await?,
        Commands::Requests { action } => commands::requests::run(action).await?,
        Commands::Admin { action } => commands::admin::run(action).await?,
    }

    Ok(())
}
