//! Cryptographic primitives for Crispy governance.
//!
//! - **Blake2b-256** for hashing call data and deriving addresses
//! - Deterministic contract addresses from `(deployer, nonce)`, so a
//!   deployment plan can know an address before the contract exists

pub mod address;
pub mod hash;

pub use address::{account_address, contract_address};
pub use hash::{blake2b_256, blake2b_256_multi, hash_payload};
