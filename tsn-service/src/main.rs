/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tonic::transport::Server;
use tracing::{error, info, warn};

use tsn_service::config::{ServiceConfig, TopologyFile};
use tsn_service::grpc::{EventHandler, NotificationHandler};
use tsn_service::optimizer::create_default_schedule;
use tsn_service::proto::tsn::notification_server::NotificationServer;
use tsn_service::proto::tsn::notification_service_server::NotificationServiceServer;
use tsn_service::store::{ConfigStore, MemoryStore};

// ── CLI argument definition ───────────────────────────────────────────────────

/// TSN configuration service.
///
/// Example:
///   tsn-service -n 5150 -e 5151 \
///               --schedule configs/schedules/default-schedule.yaml \
///               --topology configs/topology.yaml
#[derive(Debug, Parser)]
#[command(
    name = "tsn-service",
    about = "TSN service – gate control list and gNMI configuration generation",
    long_about = None,
)]
struct Cli {
    /// Port for the Notification gRPC server (CalcConfig / GetConfiguration).
    #[arg(short = 'n', long = "notification-port")]
    notification_port: Option<u16>,

    /// Port for the NotificationService gRPC server (ConfigNotification).
    #[arg(short = 'e', long = "event-port")]
    event_port: Option<u16>,

    /// YAML file holding the schedule applied to every port.
    #[arg(short = 's', long = "schedule")]
    schedule: Option<PathBuf>,

    /// YAML topology file used to seed the store.
    #[arg(short = 't', long = "topology")]
    topology: Option<PathBuf>,

    /// YAML service configuration; command-line flags override its values.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layers the command-line flags over the (optional) configuration file.
    fn resolve(&self) -> anyhow::Result<ServiceConfig> {
        let mut cfg = match &self.config {
            Some(path) => ServiceConfig::load_from_file(path)?,
            None => ServiceConfig::default(),
        };
        if let Some(port) = self.notification_port {
            cfg.notification_port = port;
        }
        if let Some(port) = self.event_port {
            cfg.event_port = port;
        }
        if let Some(path) = &self.schedule {
            cfg.schedule_file = path.clone();
        }
        if let Some(path) = &self.topology {
            cfg.topology_file = Some(path.clone());
        }
        Ok(cfg)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("TSN service starting up...");

    let cli = Cli::parse();
    if let Err(e) = run(&cli).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let cfg = cli.resolve()?;
    info!(
        notification_port = cfg.notification_port,
        event_port        = cfg.event_port,
        schedule_file     = %cfg.schedule_file.display(),
        topology_file     = ?cfg.topology_file,
        "Configuration"
    );

    // ── Seed the store ────────────────────────────────────────────────────────
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryStore::new());

    create_default_schedule(store.as_ref(), &cfg.schedule_file)
        .context("Cannot create the default schedule")?;

    match &cfg.topology_file {
        Some(path) => TopologyFile::load_from_file(path)?.seed(store.as_ref())?,
        None => warn!("No topology file provided, configurations will be empty"),
    }

    // ── Serve ─────────────────────────────────────────────────────────────────
    let notification_addr = SocketAddr::from(([0, 0, 0, 0], cfg.notification_port));
    let event_addr = SocketAddr::from(([0, 0, 0, 0], cfg.event_port));

    info!(%notification_addr, "Notification service listening");
    info!(%event_addr, "NotificationService listening");

    let notification = Server::builder()
        .add_service(NotificationServer::new(NotificationHandler::new(store)))
        .serve(notification_addr);
    let events = Server::builder()
        .add_service(NotificationServiceServer::new(EventHandler))
        .serve(event_addr);

    tokio::try_join!(notification, events).context("gRPC server failed")?;
    Ok(())
}
