//! IPC module: frame intake and client communication

mod protocol;
mod server;

pub use protocol::{DaemonStatus, Notification, Request, Response};
pub use server::Server;
