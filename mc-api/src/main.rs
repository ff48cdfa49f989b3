//! mc-api - Room listing service
//!
//! `mc-api serve` (the default) exposes rooms over HTTP, read-only.
//! `mc-api create-room` provisions a room directly in the database.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mc_common::config::{load_toml_config, CliOverrides, ServiceConfig, TomlConfig};
use mc_common::db::{init_database, rooms::create_room, NewRoom};
use mc_api::{build_router, db, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for mc-api
#[derive(Parser, Debug)]
#[command(name = "mc-api")]
#[command(about = "Room listing service for the music controller")]
#[command(version)]
struct Args {
    /// Root folder holding the database (overrides MC_ROOT_FOLDER and config file)
    #[arg(short, long, global = true)]
    root_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, global = true, env = "MC_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, global = true, env = "MC_BIND")]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            root_folder: self.root_folder.clone(),
            port: self.port,
            bind: self.bind.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default when no subcommand is given)
    Serve,
    /// Create a room and print it as JSON
    CreateRoom {
        /// Session key of the room's host
        #[arg(long)]
        host: String,

        /// Votes required to skip a song
        #[arg(long, default_value_t = 2)]
        votes_to_skip: i64,

        /// Allow guests to pause playback
        #[arg(long)]
        guest_can_pause: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing exists; problems are reported once it does
    let (toml, toml_error) = match load_toml_config() {
        Ok(toml) => (toml.unwrap_or_default(), None),
        Err(e) => (TomlConfig::default(), Some(e)),
    };

    let config = ServiceConfig::resolve(&args.overrides(), &toml);

    init_tracing(&config.log_level);

    info!("Starting mc-api v{}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = toml_error {
        warn!("Ignoring config file: {} (using defaults)", e);
    }

    match args.command {
        Some(Command::CreateRoom {
            host,
            votes_to_skip,
            guest_can_pause,
        }) => {
            let new_room = NewRoom {
                host,
                guest_can_pause,
                votes_to_skip,
            };
            run_create_room(&config, new_room).await
        }
        Some(Command::Serve) | None => run_server(&config).await,
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("mc_api={0},mc_common={0},tower_http={0}", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_server(config: &ServiceConfig) -> Result<()> {
    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    // Create the schema if needed, then serve through a query-only pool
    let writer = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let pool = db::connect_readonly(&db_path).await?;
    info!("✓ Connected to database (query-only)");

    writer.close().await;

    let rooms = db::count_rooms(&pool).await?;
    info!("{} room(s) stored", rooms);

    let app = build_router(AppState::new(pool));

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.bind, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("mc-api listening on http://{}", addr);
    info!("Rooms: http://{}/api/room", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn run_create_room(config: &ServiceConfig, new_room: NewRoom) -> Result<()> {
    let pool = init_database(&config.database_path())
        .await
        .context("Failed to initialize database")?;

    let room = create_room(&pool, &new_room)
        .await
        .context("Failed to create room")?;
    info!("Created room {} for host {}", room.code, room.host);

    println!("{}", serde_json::to_string_pretty(&room)?);

    pool.close().await;
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_port_without_subcommand() {
        env::remove_var("MC_PORT");
        env::remove_var("MC_BIND");

        let args = Args::try_parse_from(["mc-api", "--port", "9123", "--bind", "0.0.0.0"]).unwrap();
        assert!(args.command.is_none());

        let overrides = args.overrides();
        assert_eq!(overrides.port, Some(9123));
        assert_eq!(overrides.bind.as_deref(), Some("0.0.0.0"));
    }

    #[test]
    #[serial]
    fn test_port_after_serve_subcommand() {
        env::remove_var("MC_PORT");

        let args = Args::try_parse_from(["mc-api", "serve", "-p", "9200"]).unwrap();
        assert!(matches!(args.command, Some(Command::Serve)));
        assert_eq!(args.overrides().port, Some(9200));
    }

    #[test]
    #[serial]
    fn test_port_env_without_subcommand() {
        env::set_var("MC_PORT", "9124");
        env::set_var("MC_BIND", "10.0.0.1");

        let args = Args::try_parse_from(["mc-api", "--root-folder", "/tmp/mc"]).unwrap();
        let config = ServiceConfig::resolve(&args.overrides(), &TomlConfig::default());

        env::remove_var("MC_PORT");
        env::remove_var("MC_BIND");

        assert!(args.command.is_none());
        assert_eq!(config.port, 9124);
        assert_eq!(config.bind, "10.0.0.1");
        assert_eq!(config.root_folder, PathBuf::from("/tmp/mc"));
    }

    #[test]
    #[serial]
    fn test_create_room_args() {
        env::remove_var("MC_PORT");

        let args = Args::try_parse_from([
            "mc-api",
            "create-room",
            "--host",
            "session-1",
            "--guest-can-pause",
        ])
        .unwrap();

        match args.command {
            Some(Command::CreateRoom {
                ref host,
                votes_to_skip,
                guest_can_pause,
            }) => {
                assert_eq!(host, "session-1");
                assert_eq!(votes_to_skip, 2);
                assert!(guest_can_pause);
            }
            other => panic!("Expected CreateRoom, got {:?}", other),
        }
        assert_eq!(args.overrides().port, None);
    }
}
