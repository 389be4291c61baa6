//! Commit assembly and verification.
//!
//! A commit is the durable artifact of a voting phase: height, round, block
//! hash, and one signature slot per validator in set order. Assembly never
//! fails and applies no power threshold. Whether a commit is acceptable is
//! the consuming node's rule; this toolkit happily fabricates under-powered
//! commits so tests can probe exactly those rules.

use {
    crate::{
        identity::Address,
        validator_set::ValidatorSet,
        vote::{canonical_sign_bytes, VoteKind},
        vote_set::VoteSet,
    },
    log::debug,
    solana_hash::Hash,
    solana_signature::Signature,
    thiserror::Error,
};

/// One occupied commit slot: who signed, the timestamp their vote carried,
/// and the signature itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSig {
    pub validator_address: Address,
    pub timestamp: i64,
    pub signature: Signature,
}

/// Why a commit failed verification against a validator set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    /// The commit was assembled for a different sized validator set.
    #[error("commit has {got} signature slots but the validator set has {expected}")]
    SlotCountMismatch { expected: usize, got: usize },

    /// A slot claims an address other than its slot's validator.
    #[error("slot {index} is signed by {address} but belongs to {expected}")]
    AddressMismatch {
        index: usize,
        expected: Address,
        address: Address,
    },

    /// A slot's signature does not verify under its validator's key.
    #[error("signature in slot {index} does not verify for its validator")]
    InvalidSignature { index: usize },
}

/// An assembled commit: the voted block plus index-aligned signature slots.
///
/// `signatures[i]` belongs to validator `i` of the set the votes were
/// aggregated under; an empty slot means that validator never voted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub height: u64,
    pub round: u32,
    pub block_hash: Hash,
    pub signatures: Vec<Option<CommitSig>>,
}

impl Commit {
    /// Number of occupied signature slots.
    pub fn signed_count(&self) -> usize {
        self.signatures.iter().filter(|slot| slot.is_some()).count()
    }

    /// Canonical bytes the occupant of slot `index` signed, or `None` for
    /// an empty or out-of-range slot.
    ///
    /// Everything that was signed lives on the commit or the slot: the
    /// kind is always precommit, height/round/block come from the commit,
    /// and the timestamp from the slot.
    pub fn vote_sign_bytes(&self, chain_id: &str, index: usize) -> Option<Vec<u8>> {
        self.signatures
            .get(index)
            .and_then(|slot| slot.as_ref())
            .map(|commit_sig| {
                canonical_sign_bytes(
                    chain_id,
                    VoteKind::Precommit,
                    self.height,
                    self.round,
                    &self.block_hash,
                    commit_sig.timestamp,
                )
            })
    }

    /// Verify every occupied slot against the validator set it indexes.
    ///
    /// A slot passes when its address matches the validator at that index
    /// and its signature verifies under that validator's key for `chain_id`.
    /// Empty slots pass, and so does a commit with no occupied slots at
    /// all: power thresholds are the consumer's business, not checked here.
    pub fn verify(&self, chain_id: &str, validator_set: &ValidatorSet) -> Result<(), CommitError> {
        if self.signatures.len() != validator_set.len() {
            return Err(CommitError::SlotCountMismatch {
                expected: validator_set.len(),
                got: self.signatures.len(),
            });
        }

        for (index, (slot, validator)) in self
            .signatures
            .iter()
            .zip(validator_set.iter())
            .enumerate()
        {
            let Some(commit_sig) = slot else {
                continue;
            };
            if commit_sig.validator_address != validator.address {
                return Err(CommitError::AddressMismatch {
                    index,
                    expected: validator.address,
                    address: commit_sig.validator_address,
                });
            }
            let sign_bytes = canonical_sign_bytes(
                chain_id,
                VoteKind::Precommit,
                self.height,
                self.round,
                &self.block_hash,
                commit_sig.timestamp,
            );
            if !commit_sig.signature.verify(validator.pubkey.as_ref(), &sign_bytes) {
                return Err(CommitError::InvalidSignature { index });
            }
        }
        Ok(())
    }
}

impl VoteSet {
    /// Assemble the commit for this vote set's block.
    ///
    /// Never fails: every validator index maps to either its accepted
    /// vote's signature or an empty slot, in set order regardless of the
    /// order votes arrived. No minimum power is required; a commit backed
    /// by zero votes is a legitimate output here.
    pub fn make_commit(&self) -> Commit {
        let signatures: Vec<Option<CommitSig>> = (0..self.validator_set().len())
            .map(|index| {
                self.vote(index).and_then(|vote| {
                    vote.signature.map(|signature| CommitSig {
                        validator_address: vote.validator_address,
                        timestamp: vote.timestamp,
                        signature,
                    })
                })
            })
            .collect();

        let commit = Commit {
            height: self.height(),
            round: self.round(),
            block_hash: self.block_hash(),
            signatures,
        };
        debug!(
            "assembled commit at height {} round {}: {} of {} slots signed",
            commit.height,
            commit.round,
            commit.signed_count(),
            commit.signatures.len()
        );
        commit
    }
}
