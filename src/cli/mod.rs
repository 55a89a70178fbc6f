// CLI module: server start and administrative commands

pub mod create_admin;
pub mod seed;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// VolksfestFinder backend
#[derive(Parser, Debug)]
#[command(name = "volksfest-finder")]
#[command(about = "VolksfestFinder festival directory backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server
    Serve,

    /// Create an administrator account
    CreateAdmin {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Insert the demo festivals into an empty festival table
    SeedDemo,

    /// Run database migrations and exit
    Migrate,
}

/// Execute an administrative command
///
/// `Serve` is handled by main and is a no-op here.
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve => Ok(()),
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => create_admin::create_admin(&app_data.auth_service, &username, &email, password).await,
        Commands::SeedDemo => {
            let inserted = seed::seed_demo(&app_data.festival_store).await?;
            println!("Inserted {} demo festivals", inserted);
            Ok(())
        }
        Commands::Migrate => {
            // AppData::init has already brought the schema up to date
            println!("Database migrations complete");
            Ok(())
        }
    }
}
