use crispy_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};

/// Calls accepted by the ledger contract. The sender is always the caller.
///
/// Mutating calls return `()`; queries return the type noted on each variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerMsg {
    Transfer { to: Address, amount: u128 },
    /// Transfer, then announce the deposit to `to` (contracts must accept it).
    SafeTransfer { to: Address, amount: u128 },
    TransferFrom {
        from: Address,
        to: Address,
        amount: u128,
    },
    Approve { spender: Address, amount: u128 },
    IncreaseAllowance { spender: Address, added: u128 },
    DecreaseAllowance { spender: Address, subtracted: u128 },
    /// Owner only.
    Mint { to: Address, amount: u128 },
    LockBalanceUntil { until: Timestamp },
    /// Owner only.
    TransferOwnership { new_owner: Address },
    /// Owner only.
    RenounceOwnership,

    /// -> `u128`
    BalanceOf { account: Address },
    /// -> `u128`
    TotalSupply,
    /// -> `u128`
    Allowance { owner: Address, spender: Address },
    /// -> `Timestamp`
    LockedUntil { account: Address },
    /// -> `Address`
    Owner,
    /// -> `u128`
    HardCap,
    /// -> `String`
    Name,
    /// -> `String`
    Symbol,
    /// -> `u8`
    Decimals,
}
