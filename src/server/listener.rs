// Listener module
// Creates the TCP listener and classifies bind failures

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

use crate::error::ServerError;

/// Bind a listener on `addr`, reporting an occupied port as
/// [`ServerError::PortInUse`].
pub fn bind_listener(addr: std::net::SocketAddr) -> Result<TcpListener, ServerError> {
    create_listener(addr).map_err(|e| ServerError::from_bind(addr, e))
}

/// Create a `TcpListener` with `SO_REUSEADDR` enabled.
///
/// `SO_REUSEADDR` only lets us rebind a port still in `TIME_WAIT` after a
/// restart; a port with a live listener is still refused. `SO_REUSEPORT` is
/// left off so a second instance cannot share the port.
fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    // Create socket with appropriate domain (IPv4 or IPv6)
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // On Windows SO_REUSEADDR would allow stealing a bound port
    #[cfg(unix)]
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;

    // Start listening with a backlog queue size of 128
    socket.listen(128)?;

    // Convert socket2::Socket to std::net::TcpListener, then to tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
