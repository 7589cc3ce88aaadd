//! Unix domain socket server for IPC
//!
//! The landmark source submits frames here one request at a time. UI clients
//! query status, override mode or zoom, or subscribe to gesture events.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{broadcast, mpsc, oneshot, RwLock};
use tracing::{debug, error, info, warn};

use crate::events::GestureEvent;
use crate::interpreter::Command;

use super::protocol::{DaemonStatus, Notification, Request, Response};

const MAX_MESSAGE_LEN: usize = 1024 * 1024;

/// IPC Server handling client connections
pub struct Server {
    socket_path: PathBuf,
    listener: Option<UnixListener>,
    state: Arc<RwLock<ServerState>>,
    shutdown_tx: broadcast::Sender<()>,
    command_tx: mpsc::Sender<Command>,
    /// Source of events for subscribed clients
    event_tx: Option<broadcast::Sender<GestureEvent>>,
}

/// Shared server state
struct ServerState {
    status: DaemonStatus,
    start_time: std::time::Instant,
}

/// What a client handler needs from the server
#[derive(Clone)]
struct ClientContext {
    state: Arc<RwLock<ServerState>>,
    command_tx: mpsc::Sender<Command>,
    event_tx: Option<broadcast::Sender<GestureEvent>>,
}

impl Server {
    /// Create a new IPC server forwarding to the interpreter
    pub fn new(socket_path: &Path, command_tx: mpsc::Sender<Command>) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent).context("failed to create socket directory")?;
        }

        // Remove stale socket if it exists
        if socket_path.exists() {
            std::fs::remove_file(socket_path).context("failed to remove stale socket")?;
        }

        let listener = UnixListener::bind(socket_path).context("failed to bind Unix socket")?;

        // Set socket permissions to owner-only (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(socket_path, std::fs::Permissions::from_mode(0o600))?;
        }

        let (shutdown_tx, _) = broadcast::channel(1);

        let state = Arc::new(RwLock::new(ServerState {
            status: DaemonStatus::default(),
            start_time: std::time::Instant::now(),
        }));

        info!(?socket_path, "IPC server listening");

        Ok(Self {
            socket_path: socket_path.to_owned(),
            listener: Some(listener),
            state,
            shutdown_tx,
            command_tx,
            event_tx: None,
        })
    }

    /// Create a new IPC server that also serves event subscriptions
    pub fn with_events(
        socket_path: &Path,
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<GestureEvent>,
    ) -> Result<Self> {
        let mut server = Self::new(socket_path, command_tx)?;
        server.event_tx = Some(event_tx);
        Ok(server)
    }

    /// Fold an interpreter event into the reported status
    pub async fn record_event(&self, event: &GestureEvent) {
        let mut state = self.state.write().await;
        let old_mode = state.status.mode;
        state.status.record(event);

        if old_mode != state.status.mode {
            debug!(from = %old_mode, to = %state.status.mode, "IPC server: mode updated");
        }
    }

    /// Update the animated zoom shown in status
    pub async fn set_zoom_percent(&self, percent: u32) {
        self.state.write().await.status.zoom_percent = percent;
    }

    /// Current status snapshot
    pub async fn status(&self) -> DaemonStatus {
        let mut state = self.state.write().await;
        state.status.uptime_secs = state.start_time.elapsed().as_secs();
        state.status.clone()
    }

    /// Run the server, accepting connections
    pub async fn run(&self) -> Result<()> {
        let listener = self.listener.as_ref().context("server not initialized")?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    debug!("client connected");
                    let context = ClientContext {
                        state: Arc::clone(&self.state),
                        command_tx: self.command_tx.clone(),
                        event_tx: self.event_tx.clone(),
                    };
                    let mut shutdown_rx = self.shutdown_tx.subscribe();

                    tokio::spawn(async move {
                        tokio::select! {
                            result = Self::handle_client(stream, context) => {
                                if let Err(e) = result {
                                    warn!(?e, "client handler error");
                                }
                            }
                            _ = shutdown_rx.recv() => {
                                debug!("client handler shutting down");
                            }
                        }
                    });
                }
                Err(e) => {
                    error!(?e, "accept error");
                }
            }
        }
    }

    /// Handle a single client connection
    async fn handle_client(mut stream: UnixStream, context: ClientContext) -> Result<()> {
        loop {
            let Some(body) = Self::read_message(&mut stream).await? else {
                debug!("client disconnected");
                return Ok(());
            };

            let request: Request = match serde_json::from_slice(&body) {
                Ok(request) => request,
                Err(e) => {
                    debug!(%e, "malformed request");
                    Self::send_message(&mut stream, &Response::error("bad_request", e.to_string()))
                        .await?;
                    continue;
                }
            };

            let (response, subscribe) = Self::process_request(request, &context).await;

            // Subscribe before replying so no event after the reply is missed
            let events = match (&context.event_tx, subscribe) {
                (Some(event_tx), true) => Some(event_tx.subscribe()),
                _ => None,
            };

            Self::send_message(&mut stream, &response).await?;

            if let Some(events) = events {
                debug!("client subscribed to notifications");
                return Self::stream_events(&mut stream, events).await;
            }
        }
    }

    /// Read one length-prefixed message; `None` when the client is gone
    async fn read_message(stream: &mut UnixStream) -> Result<Option<Vec<u8>>> {
        let mut len_buf = [0u8; 4];
        match stream.read_exact(&mut len_buf).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let len = u32::from_le_bytes(len_buf) as usize;
        if len > MAX_MESSAGE_LEN {
            warn!(len, "message too large, disconnecting");
            return Ok(None);
        }

        let mut msg_buf = vec![0u8; len];
        stream.read_exact(&mut msg_buf).await?;
        Ok(Some(msg_buf))
    }

    /// Send a length-prefixed JSON message
    async fn send_message<T: serde::Serialize>(stream: &mut UnixStream, msg: &T) -> Result<()> {
        let msg_bytes = serde_json::to_vec(msg)?;
        let msg_len = (msg_bytes.len() as u32).to_le_bytes();

        stream.write_all(&msg_len).await?;
        stream.write_all(&msg_bytes).await?;

        Ok(())
    }

    /// Push gesture events until the client or the channel goes away
    async fn stream_events(
        stream: &mut UnixStream,
        mut events: broadcast::Receiver<GestureEvent>,
    ) -> Result<()> {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let notification = Notification::Event { event };
                    if let Err(e) = Self::send_message(stream, &notification).await {
                        debug!(?e, "subscriber disconnected");
                        return Ok(());
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return Ok(()),
            }
        }
    }

    /// Process a request and return a response
    /// Returns (Response, should_subscribe)
    async fn process_request(request: Request, context: &ClientContext) -> (Response, bool) {
        match request {
            Request::Ping => (Response::Pong, false),

            Request::GetStatus => {
                let mut state = context.state.write().await;
                state.status.uptime_secs = state.start_time.elapsed().as_secs();
                (Response::Status(state.status.clone()), false)
            }

            Request::Observe { frame } => {
                let (reply_tx, reply_rx) = oneshot::channel();
                let command = Command::Observe {
                    frame,
                    reply: Some(reply_tx),
                };
                if context.command_tx.send(command).await.is_err() {
                    return (interpreter_gone(), false);
                }
                match reply_rx.await {
                    Ok(output) => (Response::Frame(output), false),
                    Err(_) => (interpreter_gone(), false),
                }
            }

            Request::SetMode { mode } => {
                if context.command_tx.send(Command::SetMode(mode)).await.is_err() {
                    return (interpreter_gone(), false);
                }
                (Response::ModeChange { mode }, false)
            }

            Request::SetZoom { signal } => {
                if !signal.is_finite() {
                    return (Response::error("invalid_zoom", "zoom signal must be finite"), false);
                }
                let signal = signal.clamp(0.0, 1.0);
                if context.command_tx.send(Command::SetZoom(signal)).await.is_err() {
                    return (interpreter_gone(), false);
                }
                (Response::ZoomChange { signal }, false)
            }

            Request::Subscribe => match context.event_tx {
                Some(_) => (Response::Subscribed, true),
                None => (
                    Response::error("subscribe_unavailable", "server has no event stream"),
                    false,
                ),
            },
        }
    }

    /// Gracefully shutdown the server
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());

        // Remove socket file
        if self.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.socket_path) {
                warn!(?e, "failed to remove socket file");
            }
        }

        info!("IPC server shutdown complete");
    }
}

fn interpreter_gone() -> Response {
    Response::error("interpreter_unavailable", "interpreter has stopped")
}
