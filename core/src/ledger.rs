//! The external ledger capability and an in-memory reference implementation.
//!
//! The escrow state machine never moves balances itself; it expresses each
//! state transition as one batch of transfers and hands the batch to a
//! [`Ledger`], which must commit it all-or-nothing. An on-chain deployment
//! maps this to the chain's own transaction atomicity; [`MemoryLedger`]
//! provides the same contract for tests and simulation.

use std::collections::HashMap;

use crate::address::VaultAuthority;
use crate::error::LedgerError;
use crate::identity::ID;

/// One balance movement: `amount` of `mint` from `from` to `to`.
///
/// Values of this type can only be built through [`Transfer::signed`]
/// (owner-initiated) or [`Transfer::vault_release`] (escrow-authorized
/// withdrawal from a vault), so a ledger never sees an outbound vault
/// movement that the escrow state machine did not authorize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    mint: ID,
    from: ID,
    to: ID,
    amount: u64,
}

impl Transfer {
    /// A movement out of the caller's own balance.
    pub fn signed(mint: ID, from: ID, to: ID, amount: u64) -> Self {
        Self {
            mint,
            from,
            to,
            amount,
        }
    }

    /// A movement out of a vault, authorized by its [`VaultAuthority`].
    pub fn vault_release(authority: &VaultAuthority, mint: ID, to: ID, amount: u64) -> Self {
        Self {
            mint,
            from: *authority.vault(),
            to,
            amount,
        }
    }

    pub fn mint(&self) -> &ID {
        &self.mint
    }

    pub fn from(&self) -> &ID {
        &self.from
    }

    pub fn to(&self) -> &ID {
        &self.to
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/// Exclusive-custody transfer primitive the escrow core depends on.
pub trait Ledger {
    /// Current balance of `mint` held by `owner`. Unknown accounts hold zero.
    fn balance(&self, owner: &ID, mint: &ID) -> u64;

    /// Commits every transfer in `batch`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError` if any debit exceeds the payer's balance or
    /// any credit would overflow; no balance changes in that case.
    fn apply(&mut self, batch: &[Transfer]) -> Result<(), LedgerError>;

    /// Removes an empty account, releasing its storage.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountInUse` if the account still holds funds.
    fn close_account(&mut self, owner: &ID, mint: &ID) -> Result<(), LedgerError>;
}

/// In-memory [`Ledger`] with checked arithmetic and atomic batches.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    balances: HashMap<(ID, ID), u64>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `mint` to `owner`, creating the account if needed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BalanceOverflow` if the credit would overflow.
    pub fn mint_to(&mut self, owner: &ID, mint: &ID, amount: u64) -> Result<(), LedgerError> {
        let balance = self.balances.entry((*owner, *mint)).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        Ok(())
    }

    /// Number of live accounts, including empty ones not yet closed.
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self, owner: &ID, mint: &ID) -> u64 {
        self.balances.get(&(*owner, *mint)).copied().unwrap_or(0)
    }

    fn apply(&mut self, batch: &[Transfer]) -> Result<(), LedgerError> {
        // Stage every movement on a scratch copy; commit only if all succeed.
        let mut staged = self.balances.clone();
        for t in batch {
            let from = staged.entry((*t.from(), *t.mint())).or_insert(0);
            if *from < t.amount() {
                return Err(LedgerError::InsufficientBalance {
                    held: *from,
                    needed: t.amount(),
                });
            }
            *from -= t.amount();

            let to = staged.entry((*t.to(), *t.mint())).or_insert(0);
            *to = to
                .checked_add(t.amount())
                .ok_or(LedgerError::BalanceOverflow)?;
        }
        self.balances = staged;
        Ok(())
    }

    fn close_account(&mut self, owner: &ID, mint: &ID) -> Result<(), LedgerError> {
        match self.balances.get(&(*owner, *mint)) {
            Some(&held) if held > 0 => Err(LedgerError::AccountInUse(held)),
            _ => {
                self.balances.remove(&(*owner, *mint));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: ID = ID::new([1; 32]);
    const BOB: ID = ID::new([2; 32]);
    const MINT: ID = ID::new([9; 32]);

    #[test]
    fn mint_and_transfer() {
        let mut ledger = MemoryLedger::new();
        ledger.mint_to(&ALICE, &MINT, 100).unwrap();

        ledger
            .apply(&[Transfer::signed(MINT, ALICE, BOB, 40)])
            .unwrap();
        assert_eq!(ledger.balance(&ALICE, &MINT), 60);
        assert_eq!(ledger.balance(&BOB, &MINT), 40);
    }

    #[test]
    fn failed_batch_leaves_balances_untouched() {
        let mut ledger = MemoryLedger::new();
        ledger.mint_to(&ALICE, &MINT, 100).unwrap();

        // First transfer is affordable, second is not; neither may land.
        let batch = [
            Transfer::signed(MINT, ALICE, BOB, 50),
            Transfer::signed(MINT, ALICE, BOB, 51),
        ];
        let err = ledger.apply(&batch).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                held: 50,
                needed: 51
            }
        );
        assert_eq!(ledger.balance(&ALICE, &MINT), 100);
        assert_eq!(ledger.balance(&BOB, &MINT), 0);
    }

    #[test]
    fn credit_overflow_rejected() {
        let mut ledger = MemoryLedger::new();
        ledger.mint_to(&ALICE, &MINT, 10).unwrap();
        ledger.mint_to(&BOB, &MINT, u64::MAX).unwrap();

        let err = ledger
            .apply(&[Transfer::signed(MINT, ALICE, BOB, 1)])
            .unwrap_err();
        assert_eq!(err, LedgerError::BalanceOverflow);
        assert_eq!(ledger.balance(&ALICE, &MINT), 10);
    }

    #[test]
    fn close_requires_empty_account() {
        let mut ledger = MemoryLedger::new();
        ledger.mint_to(&ALICE, &MINT, 5).unwrap();

        assert_eq!(
            ledger.close_account(&ALICE, &MINT),
            Err(LedgerError::AccountInUse(5))
        );

        ledger
            .apply(&[Transfer::signed(MINT, ALICE, BOB, 5)])
            .unwrap();
        ledger.close_account(&ALICE, &MINT).unwrap();
        assert_eq!(ledger.balance(&ALICE, &MINT), 0);
    }
}
