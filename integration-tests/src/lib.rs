//! Lodestone Integration Tests
//!
//! End-to-end test suite for the commit pipeline.
//!
//! # Scenarios Tested
//!
//! 1. **Commit assembly**: full participation, partial participation with
//!    empty slots, duplicate and conflicting precommits, power accounting
//! 2. **Signing**: chain-id domain separation, cross-validator signature
//!    rejection, tampered-claim detection at verification time
//! 3. **Node wiring**: run configuration, RPC endpoint resolution, and
//!    client factories serving assembled commits

pub mod harness;
