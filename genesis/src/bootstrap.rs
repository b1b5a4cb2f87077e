//! Owner-chain bootstrap.
//!
//! The governor's constructor needs the treasury's address and the
//! treasury must end up owned by the governor, so the treasury is handed
//! to the governor's *predicted* address before the governor exists. The
//! deployment below is a fixed sequence of deployer transactions:
//!
//! | nonce | transaction                                   |
//! |-------|-----------------------------------------------|
//! | n     | deploy treasury                               |
//! | n+1   | deploy ledger                                 |
//! | ...   | one mint per non-empty allocation             |
//! | m     | ledger ownership -> treasury                  |
//! | m+1   | treasury ownership -> predicted governor      |
//! | m+2   | deploy governor (must land on the prediction) |

use crate::config::GenesisConfig;
use crate::error::GenesisError;
use crispy_chain::Chain;
use crispy_crypto::contract_address;
use crispy_governor::{GovernorContract, GovernorMsg};
use crispy_ledger::{LedgerContract, LedgerMsg};
use crispy_treasury::{TreasuryContract, TreasuryMsg};
use crispy_types::{Address, GovernorParams};
use serde::Serialize;

/// Addresses of a bootstrapped governance system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Deployment {
    pub deployer: Address,
    pub ledger: Address,
    pub treasury: Address,
    pub governor: Address,
}

/// The address `deployer`'s deployment at `nonce` will occupy.
pub fn predict_contract_address(deployer: &Address, nonce: u64) -> Address {
    contract_address(deployer, nonce)
}

/// Run the whole bootstrap against `chain` and verify the result.
pub fn deploy_governance(
    chain: &mut Chain,
    config: &GenesisConfig,
) -> Result<Deployment, GenesisError> {
    let params = config.validate()?;
    let deployer = config.deployer;

    let treasury = TreasuryContract::deploy(chain, deployer)?;
    let ledger = LedgerContract::deploy(chain, deployer)?;
    tracing::info!(%deployer, %ledger, %treasury, "ledger and treasury deployed");

    for allocation in &config.allocations {
        let amount = allocation.amount();
        if amount == 0 {
            continue;
        }
        let to = allocation.recipient.resolve(deployer, treasury);
        chain.send(deployer, ledger, 0, &LedgerMsg::Mint { to, amount })?;
        tracing::debug!(%to, amount, bps = allocation.bps, "allocation minted");
    }

    chain.send(
        deployer,
        ledger,
        0,
        &LedgerMsg::TransferOwnership { new_owner: treasury },
    )?;

    // One transaction (the treasury handoff) sits between now and the
    // governor deployment.
    let governor_nonce = chain
        .nonce_of(&deployer)
        .checked_add(1)
        .ok_or(GenesisError::InvalidParams("deployer nonce exhausted"))?;
    let predicted = predict_contract_address(&deployer, governor_nonce);
    chain.send(
        deployer,
        treasury,
        0,
        &TreasuryMsg::TransferOwnership {
            new_owner: predicted,
        },
    )?;
    tracing::info!(%treasury, %predicted, governor_nonce, "treasury handed to predicted governor");

    let governor = deploy_governor_checked(chain, deployer, ledger, treasury, params, predicted)?;

    let funding = config.treasury_native_funding();
    if funding > 0 {
        let shortfall = funding.saturating_sub(chain.native_balance(&deployer));
        if shortfall > 0 {
            chain.fund(deployer, shortfall)?;
        }
        chain.transfer_native(deployer, treasury, funding)?;
        tracing::debug!(%treasury, funding, "treasury funded");
    }

    let deployment = Deployment {
        deployer,
        ledger,
        treasury,
        governor,
    };
    verify_owner_chain(chain, &deployment)?;
    tracing::info!(%ledger, %treasury, %governor, "governance bootstrapped");
    Ok(deployment)
}

/// Deploy the governor and fail loudly if it did not land on `predicted`.
///
/// A mismatch means the treasury already belongs to an address no
/// governor occupies.
pub fn deploy_governor_checked(
    chain: &mut Chain,
    deployer: Address,
    ledger: Address,
    treasury: Address,
    params: GovernorParams,
    predicted: Address,
) -> Result<Address, GenesisError> {
    let actual = GovernorContract::deploy(chain, deployer, ledger, treasury, params)?;
    if actual != predicted {
        tracing::error!(%predicted, %actual, "governor address prediction failed");
        return Err(GenesisError::AddressMismatch { predicted, actual });
    }
    tracing::info!(governor = %actual, "governor deployed at predicted address");
    Ok(actual)
}

/// Check ledger -> treasury -> governor ownership and that the governor
/// points back at the same ledger and treasury.
pub fn verify_owner_chain(chain: &mut Chain, deployment: &Deployment) -> Result<(), GenesisError> {
    let ledger_owner: Address = chain.query_msg(deployment.ledger, &LedgerMsg::Owner)?;
    ensure_link("ledger owner", deployment.treasury, ledger_owner)?;

    let treasury_owner: Address = chain.query_msg(deployment.treasury, &TreasuryMsg::Owner)?;
    ensure_link("treasury owner", deployment.governor, treasury_owner)?;

    let governed_ledger: Address = chain.query_msg(deployment.governor, &GovernorMsg::Ledger)?;
    ensure_link("governor ledger", deployment.ledger, governed_ledger)?;

    let governed_treasury: Address =
        chain.query_msg(deployment.governor, &GovernorMsg::Treasury)?;
    ensure_link("governor treasury", deployment.treasury, governed_treasury)
}

fn ensure_link(
    component: &'static str,
    expected: Address,
    actual: Address,
) -> Result<(), GenesisError> {
    if expected != actual {
        return Err(GenesisError::OwnerChainBroken {
            component,
            expected,
            actual,
        });
    }
    Ok(())
}
