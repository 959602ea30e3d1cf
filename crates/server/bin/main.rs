use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crewchat_configuration::environment::ProcessEnvironment;
use crewchat_server::routes::create_router;
use crewchat_server::state::ServerState;

#[derive(Parser)]
struct ServerOptions {
    /// Directory holding configuration.json.
    #[arg(long, value_name = "CONFIGURATION_DIR", default_value = ".")]
    configuration: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let server_options = ServerOptions::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let parsed =
        crewchat_configuration::parse_configuration(&server_options.configuration).await?;
    let configuration =
        crewchat_configuration::make_runtime_configuration(parsed, ProcessEnvironment)?;

    // The dataset must exist and be queryable before any request is served.
    let pool = crewchat_dataset::initialize(&configuration.sources).await?;
    let state = ServerState::initialize(&configuration, pool)?;

    let router = create_router(state);

    // allow server port to be set via PORT env var
    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let address: SocketAddr = format!("0.0.0.0:{port}").parse()?;

    tracing::info!("starting server on {address}");
    axum::Server::bind(&address)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
