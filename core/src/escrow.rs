//! The escrow state machine: offer creation, atomic settlement, withdrawal.
//!
//! An offer has two states: *open* (its record exists in the registry and
//! its vault holds the offered funds) and *closed* (the record is absent).
//! `make_offer` opens; `take_offer`, `cancel_offer`, and `refund_offer`
//! close; `get_offer` observes. Every transition either completes in full
//! or leaves no trace: preconditions are checked before any custody
//! movement, and multi-transfer settlement goes through one atomic
//! ledger batch.

use tracing::{debug, info};

use crate::address::{offer_address, vault_address, VaultAuthority};
use crate::identity::ID;
use crate::interface::SettlementReceipt;
use crate::ledger::{Ledger, Transfer};
use crate::offer::Offer;
use crate::registry::OfferRegistry;
use crate::{EscrowError, Result};

/// Escrow engine binding an offer registry to a ledger capability.
///
/// Offers on distinct `(maker, id)` pairs are independent resources; the
/// engine holds no cross-offer state beyond the registry itself. Exclusivity
/// of terminal transitions on a single offer comes from record removal:
/// whichever of take/cancel/refund runs first destroys the record, and any
/// later attempt observes [`EscrowError::OfferNotFound`].
#[derive(Debug)]
pub struct Escrow<L: Ledger> {
    ledger: L,
    registry: OfferRegistry,
}

impl<L: Ledger> Escrow<L> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            registry: OfferRegistry::new(),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the underlying ledger, for the embedding
    /// environment to fund or inspect accounts outside escrow operations.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Number of currently open offers.
    pub fn open_offers(&self) -> usize {
        self.registry.len()
    }

    /// Creates an offer: locks `amount_offered` of `mint_a` from the maker
    /// into a freshly derived vault and records the offer at its derived
    /// address. Returns that address.
    ///
    /// # Errors
    ///
    /// - `InvalidTokenMint` if `mint_a == mint_b`
    /// - `InvalidAmount` if either amount is zero
    /// - `InsufficientMakerBalance` if the maker cannot fund the vault
    /// - `DuplicateOffer` if an open offer already uses `(maker, id)`
    pub fn make_offer(
        &mut self,
        maker: ID,
        id: u64,
        mint_a: ID,
        mint_b: ID,
        amount_offered: u64,
        amount_wanted: u64,
    ) -> Result<ID> {
        let offer = Offer {
            id,
            maker,
            mint_a,
            mint_b,
            amount_offered,
            amount_wanted,
        };
        offer.validate()?;

        if self.ledger.balance(&maker, &mint_a) < amount_offered {
            return Err(EscrowError::InsufficientMakerBalance);
        }

        let address = offer_address(&maker, id);
        if self.registry.contains(&address) {
            return Err(EscrowError::DuplicateOffer);
        }

        let vault = vault_address(&mint_a, &address);
        self.ledger
            .apply(&[Transfer::signed(mint_a, maker, vault, amount_offered)])?;
        // Cannot collide: occupancy was checked above and nothing else
        // writes this address.
        self.registry.insert(address, &offer)?;

        info!(%maker, id, amount_offered, amount_wanted, "offer created");
        Ok(address)
    }

    /// Settles an open offer atomically: the taker pays `amount_wanted` of
    /// `mint_b` to the maker, receives `amount_offered` of `mint_a` from the
    /// vault, the vault is closed, and the offer record is destroyed.
    ///
    /// # Errors
    ///
    /// - `OfferNotFound` if no open offer exists at `(maker, id)`
    /// - `EmptyVault` if the vault holds nothing
    /// - `InsufficientTakerBalance` if the taker cannot pay
    ///
    /// On any failure the offer stays open and no balance changes.
    pub fn take_offer(&mut self, taker: ID, maker: ID, id: u64) -> Result<SettlementReceipt> {
        let address = offer_address(&maker, id);
        let offer = self.registry.get(&address)?;

        let vault = vault_address(&offer.mint_a, &address);
        if self.ledger.balance(&vault, &offer.mint_a) == 0 {
            return Err(EscrowError::EmptyVault);
        }
        if self.ledger.balance(&taker, &offer.mint_b) < offer.amount_wanted {
            return Err(EscrowError::InsufficientTakerBalance);
        }

        let authority = VaultAuthority::new(vault);
        self.ledger.apply(&[
            Transfer::signed(offer.mint_b, taker, offer.maker, offer.amount_wanted),
            Transfer::vault_release(&authority, offer.mint_a, taker, offer.amount_offered),
        ])?;
        self.ledger.close_account(&vault, &offer.mint_a)?;
        let offer = self.registry.remove(&address)?;

        info!(%maker, %taker, id, "offer settled");
        Ok(SettlementReceipt { offer, taker })
    }

    /// Withdraws the caller's own open offer: the vault's funds return to
    /// the maker, the vault is closed, and the offer record is destroyed.
    /// Asset B balances are untouched.
    ///
    /// # Errors
    ///
    /// - `OfferNotFound` if no open offer exists at `(maker, id)`
    /// - `Unauthorized` if the stored record names a different maker
    /// - `EmptyVault` if the vault holds nothing
    pub fn cancel_offer(&mut self, maker: ID, id: u64) -> Result<()> {
        self.withdraw_offer(maker, id)
    }

    /// Alias entry point for [`Escrow::cancel_offer`]; both reclaim a
    /// still-open offer with identical effect.
    pub fn refund_offer(&mut self, maker: ID, id: u64) -> Result<()> {
        self.withdraw_offer(maker, id)
    }

    fn withdraw_offer(&mut self, maker: ID, id: u64) -> Result<()> {
        let address = offer_address(&maker, id);
        let offer = self.registry.get(&address)?;

        // Address derivation already binds the caller's identity; this
        // guards the stored record against any mismatch.
        if offer.maker != maker {
            return Err(EscrowError::Unauthorized);
        }

        let vault = vault_address(&offer.mint_a, &address);
        if self.ledger.balance(&vault, &offer.mint_a) == 0 {
            return Err(EscrowError::EmptyVault);
        }

        let authority = VaultAuthority::new(vault);
        self.ledger.apply(&[Transfer::vault_release(
            &authority,
            offer.mint_a,
            offer.maker,
            offer.amount_offered,
        )])?;
        self.ledger.close_account(&vault, &offer.mint_a)?;
        self.registry.remove(&address)?;

        info!(%maker, id, "offer refunded");
        Ok(())
    }

    /// Reads an open offer's fields. No state mutation, no custody movement.
    ///
    /// # Errors
    ///
    /// Returns `EscrowError::OfferNotFound` if the offer is absent.
    pub fn get_offer(&self, maker: &ID, id: u64) -> Result<Offer> {
        let offer = self.registry.get(&offer_address(maker, id))?;
        debug!(%offer, "offer snapshot");
        Ok(offer)
    }
}
