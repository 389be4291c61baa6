//! Address-ordered validator set construction.
//!
//! Maintains an ordered set of validators keyed by address. The ordering is
//! what gives commits their meaning: signature slot `i` belongs to the
//! validator at index `i`, so every consumer must derive the same order.

use {
    crate::identity::{Address, PrivValidator, Validator},
    log::debug,
    std::collections::HashMap,
};

/// An ordered set of validators.
///
/// Validators are sorted by address (ascending byte order) to ensure
/// deterministic ordering regardless of construction order.
#[derive(Debug, Clone)]
pub struct ValidatorSet {
    /// Validators sorted by address (ascending).
    validators: Vec<Validator>,
    /// Fast lookup from address to index in the validators vec.
    index: HashMap<Address, usize>,
    /// Sum of all validator powers.
    total_power: u64,
}

impl ValidatorSet {
    /// Create a new validator set from a list of validators. The list is
    /// sorted by address; input order does not matter.
    ///
    /// Zero-power validators keep their slot. Sets are index-complete by
    /// construction; filtering would desynchronize them from their
    /// co-sorted signing halves.
    pub fn new(mut validators: Vec<Validator>) -> Self {
        validators.sort_by(|a, b| a.address.cmp(&b.address));

        let total_power = validators.iter().map(|v| v.power).sum();
        let index = validators
            .iter()
            .enumerate()
            .map(|(i, v)| (v.address, i))
            .collect();

        debug!(
            "validator set built: {} validators, total power {}",
            validators.len(),
            total_power
        );

        Self {
            validators,
            index,
            total_power,
        }
    }

    /// Returns the number of validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if the validator set is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Returns total voting power across all validators.
    pub fn total_power(&self) -> u64 {
        self.total_power
    }

    /// Returns the validator at the given index.
    pub fn get(&self, index: usize) -> Option<&Validator> {
        self.validators.get(index)
    }

    /// Look up a validator by address.
    pub fn get_by_address(&self, address: &Address) -> Option<&Validator> {
        self.index.get(address).map(|&i| &self.validators[i])
    }

    /// Returns the index a validator occupies, if it is in the set.
    pub fn index_of(&self, address: &Address) -> Option<usize> {
        self.index.get(address).copied()
    }

    /// Returns an iterator over all validators in set order.
    pub fn iter(&self) -> impl Iterator<Item = &Validator> {
        self.validators.iter()
    }

    /// Returns all validator addresses in set order.
    pub fn addresses(&self) -> Vec<Address> {
        self.validators.iter().map(|v| v.address).collect()
    }
}

/// Build `n` equal-power validators and the signing halves that control
/// them, index-aligned.
///
/// The (validator, signing half) pairs are sorted by address as one
/// sequence and only then split, so `priv_validators[i]` controls the
/// validator at `set.get(i)` for every `i`. Powers are fixed and equal;
/// nothing here consumes randomness beyond the OS entropy behind each
/// keypair.
pub fn create_validator_set(n: usize, power: u64) -> (ValidatorSet, Vec<PrivValidator>) {
    let mut pairs: Vec<(Validator, PrivValidator)> = (0..n)
        .map(|_| {
            let priv_validator = PrivValidator::new();
            let validator = Validator::new(priv_validator.pubkey(), power);
            (validator, priv_validator)
        })
        .collect();

    // One sort for both halves; splitting afterwards cannot misalign them.
    pairs.sort_by(|a, b| a.0.address.cmp(&b.0.address));

    let (validators, priv_validators): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
    (ValidatorSet::new(validators), priv_validators)
}
