//! Durable storage for open offers, keyed by derived address.

use std::collections::HashMap;

use crate::identity::ID;
use crate::offer::Offer;
use crate::{EscrowError, Result};

const CODEC_CONFIG: bincode::config::Configuration = bincode::config::standard();

/// Key-value store of open offer records.
///
/// Records are bincode-encoded and keyed by the offer's derived address.
/// Insertion is exclusive: the first writer of an address wins and every
/// later write to the same address fails deterministically.
#[derive(Debug, Default, Clone)]
pub struct OfferRegistry {
    records: HashMap<ID, Vec<u8>>,
}

impl OfferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `offer` at `address`.
    ///
    /// # Errors
    ///
    /// Returns `EscrowError::DuplicateOffer` if the address is occupied.
    pub fn insert(&mut self, address: ID, offer: &Offer) -> Result<()> {
        if self.records.contains_key(&address) {
            return Err(EscrowError::DuplicateOffer);
        }
        let encoded = bincode::serde::encode_to_vec(offer, CODEC_CONFIG)
            .map_err(|e| EscrowError::Codec(e.to_string()))?;
        self.records.insert(address, encoded);
        Ok(())
    }

    /// Decodes the record at `address`.
    ///
    /// # Errors
    ///
    /// Returns `EscrowError::OfferNotFound` if absent, or
    /// `EscrowError::Codec` if the stored bytes do not decode.
    pub fn get(&self, address: &ID) -> Result<Offer> {
        let bytes = self.records.get(address).ok_or(EscrowError::OfferNotFound)?;
        let (offer, _) = bincode::serde::decode_from_slice(bytes, CODEC_CONFIG)
            .map_err(|e| EscrowError::Codec(e.to_string()))?;
        Ok(offer)
    }

    /// Removes and returns the record at `address`.
    ///
    /// # Errors
    ///
    /// Same failure kinds as [`OfferRegistry::get`].
    pub fn remove(&mut self, address: &ID) -> Result<Offer> {
        let bytes = self
            .records
            .remove(address)
            .ok_or(EscrowError::OfferNotFound)?;
        let (offer, _) = bincode::serde::decode_from_slice(&bytes, CODEC_CONFIG)
            .map_err(|e| EscrowError::Codec(e.to_string()))?;
        Ok(offer)
    }

    pub fn contains(&self, address: &ID) -> bool {
        self.records.contains_key(address)
    }

    /// Number of open offers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::assert_err;

    fn offer(id: u64) -> Offer {
        Offer {
            id,
            maker: ID::new([1; 32]),
            mint_a: ID::new([2; 32]),
            mint_b: ID::new([3; 32]),
            amount_offered: 10,
            amount_wanted: 20,
        }
    }

    #[test]
    fn insert_get_remove_roundtrip() {
        let mut registry = OfferRegistry::new();
        let o = offer(1);
        let addr = o.address();

        registry.insert(addr, &o).unwrap();
        assert_eq!(registry.get(&addr).unwrap(), o);
        assert_eq!(registry.remove(&addr).unwrap(), o);
        assert!(registry.is_empty());
    }

    #[test]
    fn first_writer_wins() {
        let mut registry = OfferRegistry::new();
        let first = offer(1);
        let addr = first.address();
        registry.insert(addr, &first).unwrap();

        let mut second = offer(1);
        second.amount_offered = 999;
        assert_err(registry.insert(addr, &second), EscrowError::DuplicateOffer);

        // First record is unaffected by the failed overwrite.
        assert_eq!(registry.get(&addr).unwrap(), first);
    }

    #[test]
    fn missing_address_is_not_found() {
        let mut registry = OfferRegistry::new();
        let addr = offer(5).address();
        assert_err(registry.get(&addr), EscrowError::OfferNotFound);
        assert_err(registry.remove(&addr), EscrowError::OfferNotFound);
    }
}
