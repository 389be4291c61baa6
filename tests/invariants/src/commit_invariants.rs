//! Property-based tests for vote accumulation and commit assembly.
//!
//! Properties tested:
//! 1. Alignment: commit slot `i` is occupied exactly when validator `i`
//!    voted, and carries that validator's address.
//! 2. Duplicates: a validator's power is counted at most once, no matter
//!    how often it re-votes.
//! 3. Conservation: accumulated power never exceeds the set total.
//! 4. Domains: a commit only verifies under the chain id it was signed for.

#[cfg(test)]
mod tests {
    use {
        lode_consensus_testkit::{create_validator_set, PrivValidator, VoteSet, VoteSetError},
        proptest::prelude::*,
        solana_hash::Hash,
        std::collections::HashSet,
    };

    // ── Helpers ──

    const HEIGHT: u64 = 5;
    const ROUND: u32 = 0;
    const BASE_TIMESTAMP: i64 = 1_700_000_000_000;

    fn block() -> Hash {
        Hash::new_from_array([7u8; 32])
    }

    fn fresh_vote_set(n: usize, power: u64, chain_id: &str) -> (VoteSet, Vec<PrivValidator>) {
        let (set, privs) = create_validator_set(n, power);
        let votes = VoteSet::new(chain_id, HEIGHT, ROUND, block(), set);
        (votes, privs)
    }

    /// Sign a precommit as validator `index` and feed it to the set.
    fn cast(
        votes: &mut VoteSet,
        privs: &[PrivValidator],
        index: usize,
    ) -> Result<(), VoteSetError> {
        let vote = privs[index]
            .sign_vote(
                votes.chain_id(),
                votes.height(),
                votes.round(),
                votes.block_hash(),
                index as u32,
                BASE_TIMESTAMP + index as i64,
            )
            .unwrap();
        votes.add_vote(vote)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 1. Commit slots mirror exactly who voted
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// For an arbitrary subset of signers, slot `i` is occupied exactly
        /// when bit `i` of the mask is set, and the commit verifies.
        #[test]
        fn slots_mirror_the_signer_subset(
            n in 1..=10usize,
            signer_mask in any::<u16>(),
        ) {
            let (mut votes, privs) = fresh_vote_set(n, 10, "lode-prop");
            let signers: Vec<usize> =
                (0..n).filter(|i| signer_mask & (1u16 << i) != 0).collect();

            for &i in &signers {
                cast(&mut votes, &privs, i).unwrap();
            }

            let commit = votes.make_commit();
            prop_assert_eq!(commit.signatures.len(), n);
            prop_assert_eq!(commit.signed_count(), signers.len());

            for (i, slot) in commit.signatures.iter().enumerate() {
                let expected_occupied = signers.contains(&i);
                prop_assert_eq!(slot.is_some(), expected_occupied, "Slot {} wrong", i);
                if let Some(commit_sig) = slot {
                    let member = votes.validator_set().get(i).unwrap();
                    prop_assert_eq!(commit_sig.validator_address, member.address);
                    prop_assert_eq!(commit_sig.timestamp, BASE_TIMESTAMP + i as i64);
                }
            }

            commit.verify(votes.chain_id(), votes.validator_set()).unwrap();
        }

        /// Assembly is read-only: repeated calls produce equal commits and
        /// leave the vote set untouched.
        #[test]
        fn assembly_does_not_consume_the_votes(
            n in 1..=8usize,
            signer_mask in any::<u8>(),
        ) {
            let (mut votes, privs) = fresh_vote_set(n, 10, "lode-prop");
            for i in (0..n).filter(|i| signer_mask & (1u8 << i) != 0) {
                cast(&mut votes, &privs, i).unwrap();
            }
            let count_before = votes.vote_count();
            let power_before = votes.accumulated_power();

            let first = votes.make_commit();
            let second = votes.make_commit();

            prop_assert_eq!(first, second);
            prop_assert_eq!(votes.vote_count(), count_before);
            prop_assert_eq!(votes.accumulated_power(), power_before);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 2. Duplicate votes never count twice
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// For an arbitrary cast sequence with repeats, only the first vote
        /// per validator lands; every repeat errors as a duplicate and the
        /// accumulated power counts each signer once.
        #[test]
        fn repeats_are_rejected_and_power_counts_once(
            indices in proptest::collection::vec(0..6usize, 0..=18),
        ) {
            let (mut votes, privs) = fresh_vote_set(6, 10, "lode-prop");
            let mut seen: HashSet<usize> = HashSet::new();

            for &i in &indices {
                let outcome = cast(&mut votes, &privs, i);
                if seen.insert(i) {
                    prop_assert!(outcome.is_ok(), "First vote from {} rejected", i);
                } else {
                    prop_assert_eq!(
                        outcome.unwrap_err(),
                        VoteSetError::DuplicateVote {
                            index: i as u32,
                            height: HEIGHT,
                            round: ROUND,
                        }
                    );
                }
            }

            prop_assert_eq!(votes.vote_count(), seen.len());
            prop_assert_eq!(votes.accumulated_power(), 10 * seen.len() as u64);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 3. Power conservation
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Accumulated power never exceeds the set total and reaches it
        /// exactly when every validator has voted.
        #[test]
        fn accumulated_power_is_conserved(
            n in 1..=8usize,
            signer_mask in any::<u8>(),
        ) {
            let (mut votes, privs) = fresh_vote_set(n, 10, "lode-prop");
            let signers: Vec<usize> =
                (0..n).filter(|i| signer_mask & (1u8 << i) != 0).collect();
            for &i in &signers {
                cast(&mut votes, &privs, i).unwrap();
            }

            let total = votes.validator_set().total_power();
            prop_assert!(votes.accumulated_power() <= total);
            let everyone_voted = signers.len() == n;
            prop_assert_eq!(votes.accumulated_power() == total, everyone_voted);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 4. Chain-id domain separation
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        /// A commit with at least one signature verifies under its own
        /// chain id and under no other.
        #[test]
        fn commits_verify_only_under_their_own_chain(
            chain_a in "[a-z-]{1,12}",
            chain_b in "[a-z-]{1,12}",
            n in 1..=6usize,
        ) {
            prop_assume!(chain_a != chain_b);

            let (mut votes, privs) = fresh_vote_set(n, 10, &chain_a);
            for i in 0..n {
                cast(&mut votes, &privs, i).unwrap();
            }

            let commit = votes.make_commit();
            commit.verify(&chain_a, votes.validator_set()).unwrap();
            prop_assert!(
                commit.verify(&chain_b, votes.validator_set()).is_err(),
                "Commit for {} verified under {}",
                chain_a,
                chain_b
            );
        }
    }
}
