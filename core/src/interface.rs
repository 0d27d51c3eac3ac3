//! JSON (de)serialization of offer parameters and settlement receipts.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::identity::ID;
use crate::offer::Offer;

/// Parameters required to create an offer, as prepared by a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfferParams {
    /// Identity of the offer's creator.
    pub maker: ID,
    /// Caller-supplied identifier, unique per maker.
    pub id: u64,
    /// Mint of the offered asset.
    pub mint_a: ID,
    /// Mint of the wanted asset.
    pub mint_b: ID,
    /// Quantity of `mint_a` to lock in custody.
    pub amount_offered: u64,
    /// Quantity of `mint_b` required to settle.
    pub amount_wanted: u64,
}

/// Record of a completed swap, returned by
/// [`Escrow::take_offer`](crate::escrow::Escrow::take_offer).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementReceipt {
    /// The offer that was settled (now destroyed).
    pub offer: Offer,
    /// Identity of the party that fulfilled it.
    pub taker: ID,
}

/// Reads a JSON-encoded file from the given `path` and deserializes into type `T`.
///
/// # Errors
///
/// Returns an `anyhow::Error` if the file cannot be opened, read, or parsed.
pub fn load_escrow_data<P, T>(path: P) -> anyhow::Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("loading escrow data: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("parsing JSON from {:?}", path))
}

/// Writes `data` (serializable) as pretty-printed JSON to the given `path`.
///
/// # Errors
///
/// Returns an `anyhow::Error` if the file cannot be created or data cannot be serialized.
pub fn save_escrow_data<P, T>(path: P, data: &T) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating file {:?}", path))?;
    serde_json::to_writer_pretty(file, data)
        .with_context(|| format!("serializing to JSON to {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> OfferParams {
        OfferParams {
            maker: ID::new([1; 32]),
            id: 1,
            mint_a: ID::new([2; 32]),
            mint_b: ID::new([3; 32]),
            amount_offered: 1000,
            amount_wanted: 2000,
        }
    }

    #[test]
    fn offer_params_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offer_params.json");

        let original = params();
        save_escrow_data(&path, &original).unwrap();
        let loaded: OfferParams = load_escrow_data(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn load_missing_file_fails() {
        let res: anyhow::Result<OfferParams> = load_escrow_data("/nonexistent/params.json");
        assert!(res.is_err());
    }
}
