//! Lodestone Commit Simulation Toolkit
//!
//! This crate fabricates the voting phase of Tendermint-style consensus for
//! scenario tests: it mints validator identities, arranges them into a
//! deterministic address-ordered set, signs chain-scoped precommit votes,
//! and folds accepted votes into a commit whose signature slots line up with
//! the validator set. No consensus engine runs; scenario code drives every
//! step explicitly:
//!
//! 1. **Mint**: Fresh keypairs become (validator, signing half) pairs.
//! 2. **Arrange**: Pairs are co-sorted by address into a `ValidatorSet`,
//!    so index `i` on the set side matches index `i` on the signing side.
//! 3. **Vote**: Each signing half produces a precommit over the canonical
//!    vote bytes, domain-separated by chain id.
//! 4. **Commit**: A `VoteSet` tallies one vote per validator index and
//!    assembles the index-aligned `Commit`.
//!
//! # Key Properties
//!
//! - **Deterministic ordering**: Sets sort ascending by address, and the
//!   signing halves ride along in the same sort, so a commit's slot `i`
//!   always belongs to `set.get(i)`.
//! - **Domain separation**: Sign bytes mix in the chain id, so a vote for
//!   one chain never verifies on another.
//! - **One vote per validator**: A second vote for the same index at the
//!   same height and round is rejected and changes nothing.
//! - **Deliberately permissive commits**: `make_commit` enforces no power
//!   threshold. A commit backed by zero power is a valid test artifact
//!   here; real acceptance rules live in the consuming node.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │   create_validator_set(n, power)                 │
//! │  ┌───────────┐       ┌──────────────────┐        │
//! │  │ Validator │ ...   │  PrivValidator   │ ...    │
//! │  │   Set     │◄─────►│  (index-aligned) │        │
//! │  └───────────┘       └──────────────────┘        │
//! │        │                      │ sign_vote        │
//! │        │ powers               ▼                  │
//! │        │              ┌──────────────┐           │
//! │        └─────────────►│   VoteSet    │           │
//! │                       │  add_vote    │           │
//! │                       └──────────────┘           │
//! │                              │ make_commit       │
//! │                              ▼                   │
//! │                       ┌──────────────┐           │
//! │                       │    Commit    │           │
//! │                       └──────────────┘           │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod commit;
pub mod identity;
pub mod validator_set;
pub mod vote;
pub mod vote_set;

// Re-exports for convenience
pub use commit::{Commit, CommitError, CommitSig};
pub use identity::{create_validator, Address, PrivValidator, Validator, ADDRESS_LEN};
pub use validator_set::{create_validator_set, ValidatorSet};
pub use vote::{SignError, Vote, VoteKind};
pub use vote_set::{VoteSet, VoteSetError};
