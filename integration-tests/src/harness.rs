//! Lodestone Commit Scenario Harness
//!
//! Provides a deterministic environment for exercising the commit pipeline
//! end to end:
//!
//! - Validator set construction (equal or seeded-random powers)
//! - Precommit signing under a shared chain id and block hash
//! - Vote accumulation with duplicate rejection
//! - Commit assembly and signature verification
//!
//! The harness does NOT start node processes; it pairs the in-memory
//! `lode-consensus-testkit` pipeline with run configuration from
//! `lode-node-harness` so tests can wire both sides together.

use lode_consensus_testkit::{
    create_validator, create_validator_set, Commit, CommitError, PrivValidator, SignError,
    Validator, ValidatorSet, Vote, VoteSet, VoteSetError,
};
use lode_node_harness::NodeConfig;
use rand::{rngs::StdRng, SeedableRng};
use solana_hash::Hash;
use solana_sha256_hasher::hash;
use thiserror::Error;

// ─── Constants ───────────────────────────────────────────────────────────────

/// Chain id shared by every scenario unless a test overrides it.
pub const CHAIN_ID: &str = "lodestone-test";

/// Default voting power assigned to each validator.
pub const DEFAULT_POWER: u64 = 10;

/// Default number of validators in a scenario.
pub const DEFAULT_VALIDATOR_COUNT: usize = 4;

/// Height every scenario votes at.
pub const DEFAULT_HEIGHT: u64 = 5;

/// Round every scenario votes at.
pub const DEFAULT_ROUND: u32 = 0;

/// Base vote timestamp in milliseconds (~Nov 2023). Each validator signs
/// at `BASE_TIMESTAMP + index` so slots stay distinguishable.
pub const BASE_TIMESTAMP: i64 = 1_700_000_000_000;

// ─── Logging ─────────────────────────────────────────────────────────────────

/// Initialize env_logger for a test binary. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Why a scenario failed to cast a vote.
#[derive(Debug, Error)]
pub enum CastError {
    #[error(transparent)]
    Sign(#[from] SignError),
    #[error(transparent)]
    Accumulate(#[from] VoteSetError),
}

// ─── Commit scenario ─────────────────────────────────────────────────────────

/// A self-contained commit scenario: one validator set, one block, one
/// height/round, and the vote set accumulating precommits for it.
///
/// Signing identities stay index-aligned with the validator set, so
/// `cast_vote(i)` always claims the slot that verification will check
/// it against.
pub struct CommitScenario {
    /// Signing identities, index-aligned with the vote set's validators.
    pub priv_validators: Vec<PrivValidator>,
    /// Precommits accumulated so far.
    pub votes: VoteSet,
}

impl Default for CommitScenario {
    fn default() -> Self {
        Self::new(DEFAULT_VALIDATOR_COUNT, DEFAULT_POWER)
    }
}

impl CommitScenario {
    /// Create a scenario with `n` validators of equal `power` on [`CHAIN_ID`].
    pub fn new(n: usize, power: u64) -> Self {
        Self::on_chain(n, power, CHAIN_ID)
    }

    /// Create a scenario with `n` equal-power validators on a custom chain.
    pub fn on_chain(n: usize, power: u64, chain_id: &str) -> Self {
        let (validator_set, priv_validators) = create_validator_set(n, power);
        Self::from_parts(validator_set, priv_validators, chain_id)
    }

    /// Create a scenario whose validators carry `base_power` plus a jitter
    /// drawn from a generator seeded with `seed`. Reruns with the same seed
    /// reproduce the same power distribution (the keys are still fresh).
    pub fn with_random_powers(n: usize, base_power: u64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pairs: Vec<(Validator, PrivValidator)> = (0..n)
            .map(|_| create_validator(&mut rng, true, base_power))
            .collect();
        // Same pairing rule as `create_validator_set`: order both halves
        // by address before splitting them.
        pairs.sort_by(|a, b| a.0.address.cmp(&b.0.address));
        let (validators, priv_validators): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::from_parts(ValidatorSet::new(validators), priv_validators, CHAIN_ID)
    }

    fn from_parts(
        validator_set: ValidatorSet,
        priv_validators: Vec<PrivValidator>,
        chain_id: &str,
    ) -> Self {
        let block_hash = hash(b"lodestone-block-under-test");
        let votes = VoteSet::new(
            chain_id,
            DEFAULT_HEIGHT,
            DEFAULT_ROUND,
            block_hash,
            validator_set,
        );
        Self {
            priv_validators,
            votes,
        }
    }

    /// Number of validators in the scenario.
    pub fn validator_count(&self) -> usize {
        self.votes.validator_set().len()
    }

    /// The block hash every vote targets.
    pub fn block_hash(&self) -> Hash {
        self.votes.block_hash()
    }

    /// Sign a precommit as validator `index`, claiming its own slot.
    ///
    /// The vote is returned without being added, so tests can tamper with
    /// it before accumulation.
    pub fn sign_vote_for(&self, index: usize) -> Result<Vote, SignError> {
        self.priv_validators[index].sign_vote(
            self.votes.chain_id(),
            self.votes.height(),
            self.votes.round(),
            self.votes.block_hash(),
            index as u32,
            BASE_TIMESTAMP + index as i64,
        )
    }

    /// Sign and accumulate a precommit from validator `index`.
    pub fn cast_vote(&mut self, index: usize) -> Result<(), CastError> {
        let vote = self.sign_vote_for(index)?;
        self.votes.add_vote(vote)?;
        Ok(())
    }

    /// Sign and accumulate precommits from the given validators, in order.
    pub fn cast_votes(&mut self, indices: &[usize]) -> Result<(), CastError> {
        for &index in indices {
            self.cast_vote(index)?;
        }
        Ok(())
    }

    /// Sign and accumulate a precommit from every validator.
    pub fn cast_all(&mut self) -> Result<(), CastError> {
        for index in 0..self.validator_count() {
            self.cast_vote(index)?;
        }
        Ok(())
    }

    /// Assemble a commit from the votes accumulated so far.
    pub fn commit(&self) -> Commit {
        self.votes.make_commit()
    }

    /// Verify a commit against this scenario's chain id and validator set.
    pub fn verify(&self, commit: &Commit) -> Result<(), CommitError> {
        commit.verify(self.votes.chain_id(), self.votes.validator_set())
    }

    /// Node run configuration matching this scenario's chain id.
    ///
    /// Listen addresses bind port 0 so parallel tests never collide.
    pub fn node_config(&self) -> NodeConfig {
        let mut config = NodeConfig::dev_default();
        config.chain_id = self.votes.chain_id().to_string();
        config
    }
}
