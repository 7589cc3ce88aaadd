//! globe-gesture-daemon: background daemon for the gesture-driven globe
//!
//! Accepts hand landmark frames over a Unix socket, interprets them into
//! globe mode and zoom events, animates the globe scale, and pushes events
//! to subscribed clients.

use anyhow::Result;
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use globe_gesture::config::Config;
use globe_gesture::events::GestureEvent;
use globe_gesture::globe::Globe;
use globe_gesture::interpreter::Interpreter;
use globe_gesture::ipc::Server;
use globe_gesture::lifecycle::ShutdownSignal;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "globe-gesture-daemon starting"
    );

    // Load configuration
    let config = Config::load()?;
    config.ensure_dirs()?;
    info!(
        ?config.socket_path,
        repeat = ?config.interpreter.mode_repeat,
        tick_ms = config.render_tick.as_millis() as u64,
        "configuration loaded"
    );

    let mut shutdown = ShutdownSignal::new()?;

    // IPC server -> interpreter
    let (command_tx, command_rx) = mpsc::channel(32);
    // Interpreter -> globe sink, status, subscribers
    let (event_tx, _event_rx) = broadcast::channel::<GestureEvent>(256);

    let mut interpreter = Interpreter::new(config.interpreter);
    let mut globe = Globe::new(config.zoom);

    let server = Server::with_events(&config.socket_path, command_tx, event_tx.clone())?;
    let server_for_events = &server;

    let mut globe_rx = event_tx.subscribe();
    let mut ticker = tokio::time::interval(config.render_tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("daemon initialized, entering main loop");

    tokio::select! {
        // Interpret frames in arrival order
        _ = interpreter.run(command_rx, event_tx) => {
            info!("interpreter exited");
        }

        // Accept frame sources and UI clients
        result = server.run() => {
            if let Err(e) = result {
                error!(?e, "IPC server error");
            }
        }

        // Drive the globe from events and animate zoom on each tick
        _ = async {
            loop {
                tokio::select! {
                    received = globe_rx.recv() => match received {
                        Ok(event) => {
                            globe.apply(&event);
                            server_for_events.record_event(&event).await;
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            warn!(skipped = n, "globe event receiver lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    _ = ticker.tick() => {
                        let percent = globe.tick();
                        server_for_events.set_zoom_percent(percent).await;
                    }
                }
            }
        } => {
            info!("globe sink exited");
        }

        // Wait for shutdown signal
        _ = shutdown.wait() => {
            info!("shutdown signal received");
        }
    }

    // Cleanup
    info!("shutting down...");

    server.shutdown().await;

    info!(
        mode = %globe.mode(),
        zoom_percent = globe.zoom().zoom_percent(),
        switches = globe.mode_switches(),
        "globe-gesture-daemon stopped"
    );

    Ok(())
}
