//! Hivebridge binary - wires configuration, the event channel, and the
//! bridges together. The consumer task stands in for an external event
//! router; it logs every event it receives.

use tokio::sync::{mpsc, watch};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hivebridge::adapters::{TransitBridge, WebBridge};
use hivebridge::config::AppConfig;
use hivebridge::runtime::{Bridge, EventSink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        address = %config.web.address,
        path = %config.web.path,
        transit = %config.transit.base_url,
        "starting hivebridge"
    );

    let (events_tx, mut events_rx) = mpsc::channel(config.channel_capacity);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // The router would hold these send halves; this binary keeps them
    // alive but idle.
    let (_web_actions, web_actions_rx) = mpsc::channel(16);
    let (_transit_actions, transit_actions_rx) = mpsc::channel(16);

    let web = Bridge::new(
        Box::new(WebBridge::new(config.web.clone())),
        web_actions_rx,
        shutdown_rx.clone(),
    );
    let transit = Bridge::new(
        Box::new(TransitBridge::from_config(&config.transit)),
        transit_actions_rx,
        shutdown_rx,
    );

    let web_task = tokio::spawn(web.run(EventSink::new(events_tx.clone())));
    let transit_task = tokio::spawn(transit.run(EventSink::new(events_tx)));

    let consumer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            info!(
                source = %event.source,
                kind = %event.kind,
                placeholders = event.placeholders.len(),
                "event"
            );
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    let _ = shutdown_tx.send(true);

    for task in [web_task, transit_task] {
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!(error = %err, "bridge exited with error"),
            Err(err) => error!(error = %err, "bridge task panicked"),
        }
    }
    consumer.await?;

    info!("hivebridge stopped");
    Ok(())
}
