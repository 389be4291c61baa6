//! Validator identity minting.
//!
//! Every identity is a fresh ed25519 keypair plus the metadata derived from
//! it: the public key and the 20-byte address validator sets order by. Key
//! material always comes from the OS; the injected generator is used for
//! nothing but the optional voting-power jitter.

use {
    rand::Rng,
    solana_keypair::Keypair,
    solana_pubkey::Pubkey,
    solana_sha256_hasher::hashv,
    solana_signer::Signer,
    std::fmt,
};

/// Length in bytes of a validator address.
pub const ADDRESS_LEN: usize = 20;

/// A validator address: the first [`ADDRESS_LEN`] bytes of the SHA-256
/// digest of the validator's public key.
///
/// Displays as upper-case hex. Ordering is plain byte order, which is the
/// order validator sets sort by.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Derive the address for a public key. Same key, same address.
    pub fn from_pubkey(pubkey: &Pubkey) -> Self {
        let digest = hashv(&[pubkey.as_ref()]);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest.as_ref()[..ADDRESS_LEN]);
        Self(bytes)
    }

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode_upper(self.0))
    }
}

/// A validator as it appears in a set: address, public key, voting power.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    pub address: Address,
    pub pubkey: Pubkey,
    pub power: u64,
}

impl Validator {
    /// Build a validator from a public key, deriving its address.
    pub fn new(pubkey: Pubkey, power: u64) -> Self {
        Self {
            address: Address::from_pubkey(&pubkey),
            pubkey,
            power,
        }
    }
}

/// The signing half of a validator identity.
///
/// Owns the keypair and signs precommit votes over canonical vote bytes
/// (see [`crate::vote`]). Public key and address are captured at
/// construction; a keypair that cannot report its public key aborts the
/// scenario immediately, since nothing downstream can identify it.
pub struct PrivValidator {
    keypair: Keypair,
    pubkey: Pubkey,
    address: Address,
}

impl PrivValidator {
    /// Mint a fresh identity from OS randomness.
    ///
    /// # Panics
    ///
    /// Panics if the freshly generated keypair cannot report its public
    /// key.
    pub fn new() -> Self {
        let keypair = Keypair::new();
        let pubkey = keypair
            .try_pubkey()
            .expect("freshly generated keypair must expose its public key");
        let address = Address::from_pubkey(&pubkey);
        Self {
            keypair,
            pubkey,
            address,
        }
    }

    /// The public key this identity signs under.
    pub fn pubkey(&self) -> Pubkey {
        self.pubkey
    }

    /// The address derived from this identity's public key.
    pub fn address(&self) -> Address {
        self.address
    }

    pub(crate) fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

impl fmt::Debug for PrivValidator {
    // Key material stays out of logs and assertion output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivValidator")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Mint one validator identity with a power assignment.
///
/// `base_power` is used as-is unless `use_random_power` is set, in which
/// case a jitter drawn from `rng` in `[0, u32::MAX]` is added, saturating
/// at `u64::MAX`. Callers that need reproducible powers pass a seeded
/// generator; the keypair underneath is fresh either way.
pub fn create_validator<R: Rng>(
    rng: &mut R,
    use_random_power: bool,
    base_power: u64,
) -> (Validator, PrivValidator) {
    let priv_validator = PrivValidator::new();
    let power = if use_random_power {
        base_power.saturating_add(u64::from(rng.random::<u32>()))
    } else {
        base_power
    };
    let validator = Validator::new(priv_validator.pubkey(), power);
    (validator, priv_validator)
}
