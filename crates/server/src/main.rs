// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod dispatch;
mod gateway;
mod routes;

#[cfg(test)]
mod tests;

use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use studio_agenda::AgendaGateway;
use studio_agenda_persistence::Persistence;
use tracing::{info, warn};

use crate::gateway::PersistenceGateway;
use crate::routes::{AppState, build_router};

/// Studio Agenda Server - HTTP server for photographer availability and reservations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "STUDIO_AGENDA_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "STUDIO_AGENDA_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, env = "STUDIO_AGENDA_BIND", default_value = "127.0.0.1")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Studio Agenda Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState::new(persistence);

    // Read the agenda once through the same seam the editing session uses.
    let gateway: PersistenceGateway = PersistenceGateway::new(app_state.persistence.clone());
    match gateway.fetch_slots().await {
        Ok(slots) => info!(slots = slots.len(), "Agenda loaded"),
        Err(err) => warn!(error = %err, "Could not read the agenda at startup"),
    }

    let app: Router = build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
