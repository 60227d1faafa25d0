use anyhow::Context;
use clap::Parser;
use geostack::Config;
use geostack_server::{AppState, run_server};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    #[arg(long, env = "CRANE_DATABASE_URI")]
    crane_uri: Option<String>,

    #[arg(long, env = "TRAIL_DATABASE_URI")]
    trail_uri: Option<String>,

    #[arg(long, env = "TILESTACHE_INDEX")]
    tiles_index: Option<String>,

    #[arg(long, env = "WPI_HOST")]
    wpi_host: Option<String>,

    #[arg(long, env = "WPI_DATABASE")]
    wpi_database: Option<String>,

    #[arg(long, env = "WPI_USER")]
    wpi_user: Option<String>,

    #[arg(long, env = "WPI_PASS", hide_env_values = true)]
    wpi_pass: Option<String>,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Config::from_toml(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(uri) = &self.crane_uri {
            config.crane.uri = uri.clone();
        }
        if let Some(uri) = &self.trail_uri {
            config.trail.uri = uri.clone();
        }
        if let Some(url) = &self.tiles_index {
            config.tiles.index_url = Some(url.clone());
        }
        if let Some(host) = &self.wpi_host {
            config.ports.host = host.clone();
        }
        if let Some(database) = &self.wpi_database {
            config.ports.database = database.clone();
        }
        if let Some(user) = &self.wpi_user {
            config.ports.user = user.clone();
        }
        if let Some(password) = &self.wpi_pass {
            config.ports.password = password.clone();
        }

        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geostack_server=info,geostack=info,info".into()),
        )
        .init();

    let args = Args::parse();
    let config = args.load_config()?;

    let state = AppState::from_config(&config).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    info!(
        "Serving crane, trail, port and tile endpoints (geostack {})",
        geostack::VERSION
    );
    run_server(listener, Arc::new(state), shutdown).await?;

    Ok(())
}
