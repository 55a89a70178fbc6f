use clap::Parser;
use poem::{Server, listener::TcpListener};
use std::sync::Arc;

use volksfest_finder::api::build_routes;
use volksfest_finder::app_data::AppData;
use volksfest_finder::cli::{Cli, Commands, execute_command};
use volksfest_finder::config::{LoggingConfig, Settings, SystemEnvironment, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    init_logging(&LoggingConfig::from_env(&SystemEnvironment))?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    let settings = Settings::from_env(&SystemEnvironment).inspect_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
    })?;
    tracing::debug!(?settings, "Settings loaded");

    let app_data = Arc::new(AppData::init(settings).await?);

    if command != Commands::Serve {
        return execute_command(command, &app_data).await;
    }

    let bind_address = app_data.settings.bind_address();
    tracing::info!("Server listening on http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger", bind_address);

    Server::new(TcpListener::bind(bind_address))
        .run(build_routes(app_data))
        .await?;

    Ok(())
}
