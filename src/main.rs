use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use sunshine_finder::cli::{self, Cli, Commands};
use sunshine_finder::config::SunshineConfig;
use sunshine_finder::finder::SunshineFinder;
use sunshine_finder::location_provider::ConfiguredLocationProvider;
use sunshine_finder::logging;
use sunshine_finder::mcp::McpServer;
use sunshine_finder::weather::MetNoClient;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = SunshineConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;
    debug!("Loaded configuration: {:?}", config);

    let weather = MetNoClient::new(&config.weather)?;
    let location = ConfiguredLocationProvider::from_config(&config.location);
    let finder = SunshineFinder::new(location, weather, &config);

    match cli.command {
        None => {
            let radius_km = cli.radius_or(finder.default_radius_km());
            let result = finder.find_sunshine(radius_km).await?;
            if cli.json_output {
                println!("{}", cli::render_json(&result)?);
            } else {
                print!("{}", cli::render_search(&result));
            }
        }
        Some(Commands::Weather { lat, lon }) => {
            let coordinate = sunshine_finder::Coordinate::new(lat, lon);
            let report = finder.weather_at(coordinate).await?;
            if cli.json_output {
                println!("{}", cli::render_json(&report)?);
            } else {
                print!("{}", cli::render_weather(&report));
            }
        }
        Some(Commands::Locate) => {
            let coordinate = finder.current_location().await?;
            if cli.json_output {
                println!("{}", cli::render_json(&coordinate)?);
            } else {
                print!("{}", cli::render_location(&coordinate));
            }
        }
        Some(Commands::Serve { http }) => {
            let server = McpServer::new(finder);
            match http {
                Some(port) => serve_http(port, server).await?,
                None => server.run_stdio().await?,
            }
        }
    }

    Ok(())
}

#[cfg(feature = "http")]
async fn serve_http(
    port: u16,
    server: McpServer<ConfiguredLocationProvider, MetNoClient>,
) -> Result<()> {
    sunshine_finder::web::run(port, server).await
}

#[cfg(not(feature = "http"))]
async fn serve_http(
    _port: u16,
    _server: McpServer<ConfiguredLocationProvider, MetNoClient>,
) -> Result<()> {
    anyhow::bail!("HTTP transport is not available; rebuild with `--features http`")
}
