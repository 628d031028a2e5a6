//! Development server with live reload for cloudsetup guides.
//!
//! Renders pages on request from the content directory, so edits show up
//! without a rebuild, and reloads connected browsers when files change.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{router, AppState, DevServer, DevServerConfig, ServerError};
pub use watcher::{classify_event, ChangeKind, FileWatcher, WatchEvent};
pub use websocket::{HmrHub, HmrMessage};
