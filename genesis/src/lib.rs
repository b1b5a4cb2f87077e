//! Genesis for Crispy governance: the configured initial distribution and
//! the bootstrap that closes the ledger -> treasury -> governor owner chain.

pub mod bootstrap;
pub mod config;
pub mod error;

pub use bootstrap::{
    deploy_governance, deploy_governor_checked, predict_contract_address, verify_owner_chain,
    Deployment,
};
pub use config::{Allocation, GenesisConfig, GovernorParamsConfig, Recipient, BPS_DENOMINATOR};
pub use error::GenesisError;
