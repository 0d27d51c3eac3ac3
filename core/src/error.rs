use thiserror::Error;

/// Escrow-related errors.
#[derive(Debug, Error, PartialEq)]
pub enum EscrowError {
    /// Offered and wanted mints are the same asset.
    #[error("offered and wanted token mints must differ")]
    InvalidTokenMint,

    /// Offered or wanted amount is zero.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Maker cannot fund the vault.
    #[error("maker balance too low to fund the offer")]
    InsufficientMakerBalance,

    /// Taker cannot pay the wanted amount.
    #[error("taker balance too low to fulfill the offer")]
    InsufficientTakerBalance,

    /// No open offer at the derived address.
    #[error("no offer found for this maker and id")]
    OfferNotFound,

    /// An open offer already occupies the derived address.
    #[error("an open offer already exists for this maker and id")]
    DuplicateOffer,

    /// Caller is not the maker recorded in the offer.
    #[error("only the maker may withdraw this offer")]
    Unauthorized,

    /// Vault holds no funds for an open offer.
    #[error("the vault account is empty")]
    EmptyVault,

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("identity error: {0}")]
    Identity(IdentityError),

    /// A stored offer record failed to (de)serialize.
    #[error("offer record codec failure: {0}")]
    Codec(String),
}

/// Errors surfaced by a [`Ledger`](crate::ledger::Ledger) implementation.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("insufficient balance: owner holds {held}, transfer needs {needed}")]
    InsufficientBalance { held: u64, needed: u64 },

    #[error("balance arithmetic overflow")]
    BalanceOverflow,

    #[error("cannot close an account that still holds {0} units")]
    AccountInUse(u64),
}

/// Errors that might occur while parsing into an `ID`.
#[derive(Debug, Error, PartialEq)]
pub enum IdentityError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("cannot parse identity from empty string")]
    EmptyIdentity,

    #[error("identity must be 32 bytes, got {0}")]
    InvalidLength(usize),

    #[error("unsupported identity format")]
    UnsupportedFormat,
}

impl From<IdentityError> for EscrowError {
    fn from(value: IdentityError) -> Self {
        Self::Identity(value)
    }
}
