pub mod http;

use std::net::{Ipv4Addr, SocketAddr, TcpListener};

/// An address nothing is listening on.
pub fn unused_address() -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0)).unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    address
}
