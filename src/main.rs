#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use axum::Router;
use site_contact::config::Config;
use site_contact::{AppBuilder, telemetry};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::Instrument;

async fn bind(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = TcpListener::bind(addr).await?;
    Ok(listener)
}

/// Serves `router` until the shutdown flag flips, then drains open connections.
async fn serve(listener: TcpListener, router: Router, mut shutdown_rx: watch::Receiver<bool>) -> std::io::Result<()> {
    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.wait_for(|&stop| stop).await;
        })
        .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    site_contact::setup_panic_hook();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    site_contact::spawn_signal_handler(shutdown_tx.clone());

    let (contact_listener, mgmt_listener, contact_router) = async {
        let services = AppBuilder::new(config.clone()).build();
        let contact_router = site_contact::api::app_router(&config, services);

        let contact_listener = bind(&config.server.host, config.server.port).await?;
        let mgmt_listener = bind(&config.server.host, config.server.mgmt_port).await?;

        tracing::info!(address = %contact_listener.local_addr()?, route = %config.contact.route, "contact form listening");
        tracing::info!(address = %mgmt_listener.local_addr()?, "management server listening");

        Ok::<_, anyhow::Error>((contact_listener, mgmt_listener, contact_router))
    }
    .instrument(tracing::info_span!("boot_server"))
    .await?;

    let servers = async {
        tokio::try_join!(
            serve(contact_listener, contact_router, shutdown_rx.clone()),
            serve(mgmt_listener, site_contact::api::mgmt_router(), shutdown_rx.clone()),
        )
    };

    let mut drain_rx = shutdown_rx.clone();
    let drain_deadline = Duration::from_secs(config.server.shutdown_timeout_secs);

    tokio::select! {
        result = servers => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
            }
        }
        () = async {
            let _ = drain_rx.wait_for(|&stop| stop).await;
            tokio::time::sleep(drain_deadline).await;
        } => {
            tracing::warn!(timeout_secs = drain_deadline.as_secs(), "Contact form still draining, giving up");
        }
    }

    let _ = shutdown_tx.send(true);
    telemetry_guard.shutdown();
    Ok(())
}
