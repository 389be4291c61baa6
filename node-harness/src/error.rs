//! Error types for the node harness.

use thiserror::Error;

/// Errors that can occur while preparing node wiring for a scenario.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The chain id is empty; votes signed under it would share a domain
    /// with every other unconfigured chain.
    #[error("chain id must not be empty")]
    EmptyChainId,

    /// The listen address is not a parseable URL.
    #[error("invalid listen address {addr:?}: {source}")]
    InvalidListenAddr {
        /// The address as configured.
        addr: String,
        #[source]
        source: url::ParseError,
    },

    /// The listen address parsed but carries no host.
    #[error("listen address {0:?} has no host")]
    MissingHost(String),

    /// The listen address parsed but carries no port.
    #[error("listen address {0:?} has no port")]
    MissingPort(String),

    /// Binding a throwaway listener for port discovery failed.
    #[error("port reservation failed: {0}")]
    PortReservation(#[from] std::io::Error),
}

/// Convenience result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
