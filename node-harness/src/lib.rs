//! Lodestone Node Harness
//!
//! Wiring glue between scenario tests and the node processes they drive:
//!
//! - **Run configuration**: chain identity, listen addresses in URL form,
//!   and the retained-blocks pruning policy a scenario node runs with.
//! - **Endpoint resolution**: listen-address URLs down to the `host:port`
//!   strings clients dial, plus loopback port discovery so several nodes
//!   can run side by side.
//! - **Client seam**: scenarios bring their own RPC client; the harness
//!   only brokers the endpoint to it.
//!
//! Starting and stopping node processes is deliberately not here: the
//! harness prepares wiring, the node binary owns its own lifecycle.
//!
//! ## Crate modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`]   | `NodeConfig` defaults, validation, dev overrides |
//! | [`endpoint`] | Listen-address parsing, free-port reservation |
//! | [`client`]   | `RpcClientFactory` seam for scenario clients |
//! | [`error`]    | Crate-wide error enum |

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;

// Re-exports for convenience
pub use client::RpcClientFactory;
pub use config::{NodeConfig, DEFAULT_RETAIN_BLOCKS};
pub use endpoint::{parse_listen_addr, reserve_free_port, rpc_endpoint};
pub use error::{HarnessError, Result};
