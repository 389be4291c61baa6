//! Listen-address resolution for scenario clients.
//!
//! Node configs carry listen addresses in URL form (`tcp://host:port`);
//! clients dial bare `host:port` strings. This module owns that
//! translation, plus the loopback port discovery scenarios use to run
//! several nodes side by side.

use {
    crate::{
        config::NodeConfig,
        error::{HarnessError, Result},
    },
    log::debug,
    std::net::TcpListener,
    url::Url,
};

/// Resolve a listen-address URL such as `tcp://127.0.0.1:26657` into the
/// `host:port` string a client dials.
pub fn parse_listen_addr(addr: &str) -> Result<String> {
    let url = Url::parse(addr).map_err(|source| HarnessError::InvalidListenAddr {
        addr: addr.to_string(),
        source,
    })?;
    let host = url
        .host_str()
        .ok_or_else(|| HarnessError::MissingHost(addr.to_string()))?;
    let port = url
        .port()
        .ok_or_else(|| HarnessError::MissingPort(addr.to_string()))?;
    Ok(format!("{host}:{port}"))
}

/// The endpoint scenario clients dial for this node's RPC.
pub fn rpc_endpoint(config: &NodeConfig) -> Result<String> {
    parse_listen_addr(&config.rpc_listen_addr)
}

/// Reserve an OS-assigned TCP port on loopback and release it immediately.
///
/// The reservation is only as good as the gap between release and reuse;
/// callers bind it right away. That race is inherent to the technique and
/// acceptable for test wiring.
pub fn reserve_free_port() -> Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    let port = listener.local_addr()?.port();
    debug!("reserved free port {port}");
    Ok(port)
}
