//! Vote aggregation for a single (chain, height, round, block).
//!
//! A [`VoteSet`] accepts at most one precommit per validator index and
//! keeps a running total of the voting power behind the accepted votes.
//! The one Byzantine behavior it polices is double voting. It does not
//! verify signatures and does not check that a vote's address matches its
//! claimed index; both are the vote factory's territory, and a wrong claim
//! surfaces as a commit slot that fails verification downstream.

use {
    crate::{validator_set::ValidatorSet, vote::Vote},
    log::{debug, warn},
    solana_hash::Hash,
    thiserror::Error,
};

/// Why [`VoteSet::add_vote`] rejected a vote. Rejections never change the
/// set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoteSetError {
    /// The vote belongs to a different height or round.
    #[error(
        "vote for height {height} round {round} does not belong to vote set \
         at height {expected_height} round {expected_round}"
    )]
    HeightRoundMismatch {
        expected_height: u64,
        expected_round: u32,
        height: u64,
        round: u32,
    },

    /// The claimed validator index does not exist in the set.
    #[error("validator index {index} out of range for a set of {len} validators")]
    IndexOutOfRange { index: u32, len: usize },

    /// The vote was never signed.
    #[error("vote from validator index {index} carries no signature")]
    UnsignedVote { index: u32 },

    /// A vote for this validator index was already accepted.
    #[error("duplicate vote from validator index {index} at height {height} round {round}")]
    DuplicateVote { index: u32, height: u64, round: u32 },

    /// The vote targets a block this set does not track.
    #[error("vote targets block {block_hash} but this vote set tracks {expected}")]
    BlockHashMismatch { expected: Hash, block_hash: Hash },
}

/// Aggregates precommits for one (chain id, height, round, block hash).
///
/// Slots follow validator set order: the vote accepted for index `i` came
/// from the caller claiming `set.get(i)`.
#[derive(Debug, Clone)]
pub struct VoteSet {
    chain_id: String,
    height: u64,
    round: u32,
    block_hash: Hash,
    validator_set: ValidatorSet,
    /// Accepted votes, one slot per validator index in set order.
    votes: Vec<Option<Vote>>,
    /// Total power of the validators whose votes were accepted.
    accumulated_power: u64,
}

impl VoteSet {
    /// Create an empty vote set for one block at one height and round.
    pub fn new(
        chain_id: impl Into<String>,
        height: u64,
        round: u32,
        block_hash: Hash,
        validator_set: ValidatorSet,
    ) -> Self {
        let votes = vec![None; validator_set.len()];
        Self {
            chain_id: chain_id.into(),
            height,
            round,
            block_hash,
            validator_set,
            votes,
            accumulated_power: 0,
        }
    }

    /// Add one precommit to the set.
    ///
    /// Checks are structural only: height/round, index range, signature
    /// presence, double vote, block target. Signature validity is not
    /// checked here.
    pub fn add_vote(&mut self, vote: Vote) -> Result<(), VoteSetError> {
        if vote.height != self.height || vote.round != self.round {
            return Err(VoteSetError::HeightRoundMismatch {
                expected_height: self.height,
                expected_round: self.round,
                height: vote.height,
                round: vote.round,
            });
        }

        let index = vote.validator_index as usize;
        if index >= self.validator_set.len() {
            return Err(VoteSetError::IndexOutOfRange {
                index: vote.validator_index,
                len: self.validator_set.len(),
            });
        }

        if vote.signature.is_none() {
            return Err(VoteSetError::UnsignedVote {
                index: vote.validator_index,
            });
        }

        // Double vote is checked before the block target so that a
        // conflicting second vote reports as the duplicate it is, not as a
        // stray block.
        if self.votes[index].is_some() {
            warn!(
                "duplicate vote from validator index {} at height {} round {}",
                vote.validator_index, self.height, self.round
            );
            return Err(VoteSetError::DuplicateVote {
                index: vote.validator_index,
                height: self.height,
                round: self.round,
            });
        }

        if vote.block_hash != self.block_hash {
            return Err(VoteSetError::BlockHashMismatch {
                expected: self.block_hash,
                block_hash: vote.block_hash,
            });
        }

        let power = self.validator_set.get(index).map(|v| v.power).unwrap_or(0);
        self.accumulated_power = self.accumulated_power.saturating_add(power);
        self.votes[index] = Some(vote);
        debug!(
            "vote accepted from validator index {index} at height {} round {}, \
             accumulated power {}",
            self.height, self.round, self.accumulated_power
        );
        Ok(())
    }

    /// The chain id this set's votes were signed for.
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Height this set aggregates.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Round this set aggregates.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The block every accepted vote targets.
    pub fn block_hash(&self) -> Hash {
        self.block_hash
    }

    /// The validator set whose indices slot this vote set.
    pub fn validator_set(&self) -> &ValidatorSet {
        &self.validator_set
    }

    /// The accepted vote for a validator index, if any.
    pub fn vote(&self, index: usize) -> Option<&Vote> {
        self.votes.get(index).and_then(|slot| slot.as_ref())
    }

    /// Whether the validator at `index` has an accepted vote.
    pub fn has_voted(&self, index: usize) -> bool {
        self.vote(index).is_some()
    }

    /// Number of accepted votes.
    pub fn vote_count(&self) -> usize {
        self.votes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total power of the validators with accepted votes.
    pub fn accumulated_power(&self) -> u64 {
        self.accumulated_power
    }
}
