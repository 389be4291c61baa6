//! Precommit votes and canonical vote signing.
//!
//! A vote binds (height, round, block hash) to a validator slot. What gets
//! signed is the canonical encoding: fixed-order, fixed-width fields plus
//! the chain id as a length-prefixed domain separator. The validator
//! address and index stay out of the signed bytes; they bind a vote to its
//! slot in the set, not to the claim being signed.

use {
    crate::identity::{Address, PrivValidator},
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    solana_signature::Signature,
    solana_signer::{Signer, SignerError},
    thiserror::Error,
};

// ---------------------------------------------------------------------------
// Vote kind
// ---------------------------------------------------------------------------

/// The kind of vote being cast.
///
/// This crate only fabricates precommits. The prevote variant exists so the
/// canonical encoding carries a distinct tag byte per kind, the way the
/// real wire protocol separates the two phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteKind {
    Prevote,
    Precommit,
}

impl VoteKind {
    /// Tag byte mixed into the canonical sign bytes.
    fn tag(self) -> u8 {
        match self {
            VoteKind::Prevote => 1,
            VoteKind::Precommit => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Vote
// ---------------------------------------------------------------------------

/// A single vote, unsigned until [`PrivValidator::sign_vote`] fills the
/// signature field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub kind: VoteKind,
    pub height: u64,
    pub round: u32,
    pub block_hash: Hash,
    /// Address of the validator casting the vote, taken from its key.
    pub validator_address: Address,
    /// The set slot the caller claims for this vote. Never checked against
    /// the address; a wrong claim surfaces later as a misaligned commit
    /// slot.
    pub validator_index: u32,
    /// Millisecond unix timestamp the vote carries.
    pub timestamp: i64,
    pub signature: Option<Signature>,
}

impl Vote {
    /// Canonical bytes signed for this vote under `chain_id`.
    pub fn sign_bytes(&self, chain_id: &str) -> Vec<u8> {
        canonical_sign_bytes(
            chain_id,
            self.kind,
            self.height,
            self.round,
            &self.block_hash,
            self.timestamp,
        )
    }

    /// Verify this vote's signature against `pubkey` under `chain_id`.
    /// Unsigned votes never verify.
    pub fn verify_signature(&self, chain_id: &str, pubkey: &Pubkey) -> bool {
        match &self.signature {
            Some(signature) => signature.verify(pubkey.as_ref(), &self.sign_bytes(chain_id)),
            None => false,
        }
    }
}

/// Bytes of the fixed-width portion of the canonical encoding:
/// tag, height, round, block hash, timestamp, chain id length.
const CANONICAL_FIXED_LEN: usize = 1 + 8 + 4 + 32 + 8 + 4;

/// Assemble the canonical sign bytes.
///
/// Integers are little-endian fixed width and the chain id is length
/// prefixed, so no field can bleed into its neighbor and two distinct
/// (chain id, vote) inputs never produce the same bytes.
pub(crate) fn canonical_sign_bytes(
    chain_id: &str,
    kind: VoteKind,
    height: u64,
    round: u32,
    block_hash: &Hash,
    timestamp: i64,
) -> Vec<u8> {
    let chain_bytes = chain_id.as_bytes();
    let mut bytes = Vec::with_capacity(CANONICAL_FIXED_LEN.saturating_add(chain_bytes.len()));
    bytes.push(kind.tag());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&round.to_le_bytes());
    bytes.extend_from_slice(block_hash.as_ref());
    bytes.extend_from_slice(&timestamp.to_le_bytes());
    bytes.extend_from_slice(&(chain_bytes.len() as u32).to_le_bytes());
    bytes.extend_from_slice(chain_bytes);
    bytes
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Errors surfaced while producing a signed vote.
///
/// Recoverable by contract: the caller decides what a failed signature
/// means for its scenario. Nothing here retries.
#[derive(Debug, Error)]
pub enum SignError {
    /// Key retrieval or the signing operation itself failed.
    #[error("vote signing failed: {0}")]
    Signer(#[from] SignerError),
}

impl PrivValidator {
    /// Build and sign a precommit for (`height`, `round`, `block_hash`)
    /// under `chain_id`.
    ///
    /// The vote's address comes from this identity's own key;
    /// `validator_index` is the caller's claim about which set slot the
    /// identity occupies and is passed through untouched.
    pub fn sign_vote(
        &self,
        chain_id: &str,
        height: u64,
        round: u32,
        block_hash: Hash,
        validator_index: u32,
        timestamp: i64,
    ) -> Result<Vote, SignError> {
        let mut vote = Vote {
            kind: VoteKind::Precommit,
            height,
            round,
            block_hash,
            validator_address: self.address(),
            validator_index,
            timestamp,
            signature: None,
        };
        let signature = self
            .keypair()
            .try_sign_message(&vote.sign_bytes(chain_id))?;
        vote.signature = Some(signature);
        Ok(vote)
    }
}
