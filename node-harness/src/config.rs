//! Run configuration for scenario-driven nodes.

use crate::{
    endpoint,
    error::{HarnessError, Result},
};

/// Number of recent blocks a scenario node keeps before pruning.
///
/// Scenario nodes mint blocks far faster than a wall-clock chain, so an
/// unpruned store would dominate test disk usage. 10 000 blocks keeps
/// plenty of history for queries while bounding growth.
pub const DEFAULT_RETAIN_BLOCKS: u64 = 10_000;

/// Default RPC listen address for a scenario node.
pub const DEFAULT_RPC_LISTEN_ADDR: &str = "tcp://127.0.0.1:26657";

/// Default P2P listen address for a scenario node.
pub const DEFAULT_P2P_LISTEN_ADDR: &str = "tcp://127.0.0.1:26656";

/// Run configuration for a node driven by scenario code.
///
/// The harness never starts node processes itself; it prepares and checks
/// the wiring (chain identity, listen addresses, pruning policy) that the
/// node layer and RPC clients consume.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Chain this node joins; also the domain separator its votes sign
    /// under.
    pub chain_id: String,

    /// RPC listen address in URL form.
    /// Default: `tcp://127.0.0.1:26657`
    pub rpc_listen_addr: String,

    /// P2P listen address in URL form.
    /// Default: `tcp://127.0.0.1:26656`
    pub p2p_listen_addr: String,

    /// How many recent blocks to keep before pruning. Zero keeps
    /// everything.
    /// Default: 10 000.
    pub retain_blocks: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            chain_id: "lodestone-dev".to_string(),
            rpc_listen_addr: DEFAULT_RPC_LISTEN_ADDR.to_string(),
            p2p_listen_addr: DEFAULT_P2P_LISTEN_ADDR.to_string(),
            retain_blocks: DEFAULT_RETAIN_BLOCKS,
        }
    }
}

impl NodeConfig {
    /// Check the config is usable before handing it to a node process.
    pub fn validate(&self) -> Result<()> {
        if self.chain_id.is_empty() {
            return Err(HarnessError::EmptyChainId);
        }
        endpoint::parse_listen_addr(&self.rpc_listen_addr)?;
        endpoint::parse_listen_addr(&self.p2p_listen_addr)?;
        Ok(())
    }

    /// Config suitable for local testing: loopback listeners on
    /// OS-assigned ports and a short pruning horizon.
    #[cfg(any(test, feature = "dev-context-only-utils"))]
    pub fn dev_default() -> Self {
        Self {
            chain_id: "lodestone-test".to_string(),
            rpc_listen_addr: "tcp://127.0.0.1:0".to_string(),
            p2p_listen_addr: "tcp://127.0.0.1:0".to_string(),
            retain_blocks: 100,
        }
    }
}
