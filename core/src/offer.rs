//! The offer record: one in-flight escrow between a maker and any taker.

use serde::{Deserialize, Serialize};

use crate::address::offer_address;
use crate::identity::ID;
use crate::{EscrowError, Result};

/// Smallest transferable quantity; zero-amount offers are rejected.
pub const MIN_TRANSFER_AMOUNT: u64 = 1;

/// A maker's open offer: `amount_offered` of `mint_a` held in custody,
/// exchanged in full for `amount_wanted` of `mint_b`.
///
/// All fields are fixed at creation. The record exists exactly while the
/// offer is open; settlement and withdrawal both destroy it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Caller-supplied identifier, unique per maker.
    pub id: u64,
    /// Identity of the account that created the offer.
    pub maker: ID,
    /// Mint of the asset held in the vault.
    pub mint_a: ID,
    /// Mint of the asset the maker wants in return.
    pub mint_b: ID,
    /// Quantity of `mint_a` in custody.
    pub amount_offered: u64,
    /// Quantity of `mint_b` required to settle.
    pub amount_wanted: u64,
}

impl Offer {
    /// Validate creation invariants: distinct mints, nonzero amounts.
    pub fn validate(&self) -> Result<()> {
        if self.mint_a == self.mint_b {
            return Err(EscrowError::InvalidTokenMint);
        }
        if self.amount_offered < MIN_TRANSFER_AMOUNT || self.amount_wanted < MIN_TRANSFER_AMOUNT {
            return Err(EscrowError::InvalidAmount);
        }
        Ok(())
    }

    /// The derived address this offer lives at.
    pub fn address(&self) -> ID {
        offer_address(&self.maker, self.id)
    }
}

impl std::fmt::Display for Offer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Offer[{}#{}: {} of {} for {} of {}]",
            self.maker, self.id, self.amount_offered, self.mint_a, self.amount_wanted, self.mint_b
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::assert_err;

    fn offer() -> Offer {
        Offer {
            id: 1,
            maker: ID::new([1; 32]),
            mint_a: ID::new([2; 32]),
            mint_b: ID::new([3; 32]),
            amount_offered: 1000,
            amount_wanted: 2000,
        }
    }

    #[test]
    fn valid_offer() {
        assert!(offer().validate().is_ok());
    }

    #[test]
    fn identical_mints_rejected() {
        let mut o = offer();
        o.mint_b = o.mint_a;
        assert_err(o.validate(), EscrowError::InvalidTokenMint);
    }

    #[test]
    fn zero_amounts_rejected() {
        let mut o = offer();
        o.amount_offered = 0;
        assert_err(o.validate(), EscrowError::InvalidAmount);

        let mut o = offer();
        o.amount_wanted = 0;
        assert_err(o.validate(), EscrowError::InvalidAmount);
    }

    #[test]
    fn address_matches_derivation() {
        let o = offer();
        assert_eq!(o.address(), crate::address::offer_address(&o.maker, o.id));
    }
}
