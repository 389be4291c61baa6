//! Client-construction seam for scenario RPC access.
//!
//! The harness never speaks RPC itself; scenarios bring their own client.
//! [`RpcClientFactory`] is the only contract between them: an endpoint in,
//! a handle out. Closures implement it, so scenario crates rarely write an
//! impl by hand.

/// Builds RPC client handles from `host:port` endpoints.
///
/// The error type belongs to the factory, not the harness; a refused
/// connection means whatever the scenario's client says it means.
pub trait RpcClientFactory {
    /// The handle this factory produces.
    type Client;
    /// The factory's own failure type.
    type Error;

    /// Connect a client for the node reachable at `endpoint`.
    fn connect(&self, endpoint: &str) -> Result<Self::Client, Self::Error>;
}

impl<F, C, E> RpcClientFactory for F
where
    F: Fn(&str) -> Result<C, E>,
{
    type Client = C;
    type Error = E;

    fn connect(&self, endpoint: &str) -> Result<C, E> {
        self(endpoint)
    }
}
