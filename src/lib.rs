//! A minimal FTP server over a read-only, in-memory filesystem.
//!
//! Each control connection gets its own [`Session`] and passive data listener.
//! Commands are parsed, dispatched through a verb table and answered strictly in
//! order.

pub mod config;
pub mod core_cli;
pub mod core_ftpcommand;
pub mod core_log;
pub mod core_network;
pub mod core_vfs;
pub mod reply;
pub mod server;
pub mod session;

pub use config::Config;
pub use core_vfs::{Node, VirtualFs};
pub use reply::{Reply, ReplyCode};
pub use session::Session;
