//! Trustless two-party token-for-token escrow.
//!
//! A maker locks an amount of asset A into a derived vault and names the
//! amount of asset B wanted in return; any taker settles the swap
//! atomically, or the maker reclaims the deposit. Balance movement itself
//! is an external [`Ledger`] capability; this crate owns the offer
//! registry, address derivation, and the state machine binding them.

/// Deterministic offer/vault address derivation and the vault authority
pub mod address;
/// Escrow state machine: make, take, cancel/refund, get
pub mod escrow;
/// Identities of parties, mints, and derived accounts
pub mod identity;
/// JSON interchange of offer parameters and settlement receipts
pub mod interface;
/// The ledger capability boundary and an in-memory implementation
pub mod ledger;
/// The offer record and its creation invariants
pub mod offer;
/// Address-keyed storage of open offers
pub mod registry;
/// Test helpers
pub mod utils;

pub mod error;
pub use error::EscrowError;

pub use crate::address::{offer_address, vault_address, VaultAuthority};
pub use crate::error::{IdentityError, LedgerError};
pub use crate::escrow::Escrow;
pub use crate::identity::ID;
pub use crate::interface::{OfferParams, SettlementReceipt};
pub use crate::ledger::{Ledger, MemoryLedger, Transfer};
pub use crate::offer::Offer;
pub use crate::registry::OfferRegistry;

pub type Result<T> = std::result::Result<T, EscrowError>;
