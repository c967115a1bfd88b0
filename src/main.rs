// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};

use tracing_subscriber::EnvFilter;

use admin_gateway::{
    api::router,
    audit::JsonlAuditLog,
    catalog::ProductCatalog,
    config::{AuthSettings, DATA_DIR_ENV},
    state::AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Startup misconfiguration is terminal; requests never see these panics
    let settings = AuthSettings::from_env();

    let data_dir =
        PathBuf::from(env::var(DATA_DIR_ENV).unwrap_or_else(|_| "/data".to_string()));

    let audit = JsonlAuditLog::open(data_dir.join("audit"))
        .expect("Failed to open audit log directory");
    let catalog = ProductCatalog::open(&data_dir.join("catalog.redb"))
        .expect("Failed to open product catalog database");

    let state = AppState::new(settings, Arc::new(audit), Arc::new(catalog));
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Admin gateway listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("Shutdown signal received");
}
