//! Deterministic address derivation.
//!
//! Contract address: trailing 20 bytes of
//! `Blake2b-256("crispy/contract" || deployer || nonce_le_u64)`.
//! The deployer's nonce is its count of previously submitted transactions
//! and deployments, so the address of the next contract it deploys is fixed
//! before deployment.

use crate::hash::blake2b_256_multi;
use crispy_types::Address;

const CONTRACT_DOMAIN: &[u8] = b"crispy/contract";
const ACCOUNT_DOMAIN: &[u8] = b"crispy/account";

/// The address a contract gets when `deployer` deploys it at `nonce`.
pub fn contract_address(deployer: &Address, nonce: u64) -> Address {
    let digest = blake2b_256_multi(&[CONTRACT_DOMAIN, deployer.as_bytes(), &nonce.to_le_bytes()]);
    Address::from_digest(&digest)
}

/// An externally-owned account address derived from an arbitrary label.
///
/// Used for named dev/test accounts; never collides with contract addresses
/// because of the domain separator.
pub fn account_address(label: &str) -> Address {
    let digest = blake2b_256_multi(&[ACCOUNT_DOMAIN, label.as_bytes()]);
    Address::from_digest(&digest)
}
