//! Deterministic derivation of offer and vault addresses.
//!
//! An offer's location is a pure function of `(maker, id)` and the vault's
//! location a pure function of `(mint, offer address)`, so no index structure
//! is needed: derivation *is* the lookup mechanism. Distinct key tuples map
//! to distinct addresses (collision resistance of SHA-256).

use sha2::{Digest, Sha256};

use crate::identity::ID;

/// Namespace seed for offer address derivation.
pub const OFFER_SEED: &[u8] = b"offer";

/// Namespace seed for vault address derivation.
pub const VAULT_SEED: &[u8] = b"vault";

/// Derives the unique address of the offer record for `(maker, id)`.
pub fn offer_address(maker: &ID, id: u64) -> ID {
    let mut hasher = Sha256::new();
    hasher.update(OFFER_SEED);
    hasher.update(maker.as_bytes());
    hasher.update(id.to_le_bytes());
    ID::new(hasher.finalize().into())
}

/// Derives the custody account address for an offer's vault from the
/// offered mint and the offer's own address.
pub fn vault_address(mint: &ID, offer: &ID) -> ID {
    let mut hasher = Sha256::new();
    hasher.update(VAULT_SEED);
    hasher.update(mint.as_bytes());
    hasher.update(offer.as_bytes());
    ID::new(hasher.finalize().into())
}

/// Capability to move funds out of one vault.
///
/// Only the escrow state machine can construct this, so no caller-held key
/// can authorize an outbound vault transfer. Presenting the authority to the
/// ledger (via [`Transfer::vault_release`](crate::ledger::Transfer::vault_release))
/// is the sole release path.
#[derive(Debug)]
pub struct VaultAuthority {
    vault: ID,
}

impl VaultAuthority {
    pub(crate) fn new(vault: ID) -> Self {
        Self { vault }
    }

    /// Address of the vault this authority controls.
    pub fn vault(&self) -> &ID {
        &self.vault
    }
}
