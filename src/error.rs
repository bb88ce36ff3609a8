//! Startup error types
//!
//! Request handling never fails outward (every problem becomes an HTTP
//! response), so these only cover what can stop the process.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Another process already listens on the port
    #[error("port {port} is already in use")]
    PortInUse { port: u16 },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ServerError {
    /// Classify a bind failure, singling out an occupied port
    pub fn from_bind(addr: SocketAddr, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::AddrInUse {
            Self::PortInUse { port: addr.port() }
        } else {
            Self::Bind { addr, source }
        }
    }

    pub const fn is_port_in_use(&self) -> bool {
        matches!(self, Self::PortInUse { .. })
    }

    /// Process exit status for this error; never zero
    #[allow(clippy::unused_self)]
    pub const fn exit_code(&self) -> u8 {
        1
    }
}
