//! Governor economic parameters, fixed at construction.

use crate::amount::{frac_mul, units, SCALE};
use serde::{Deserialize, Serialize};

/// The governor's immutable economic constants.
///
/// Rates are fixed-point fractions scaled by [`SCALE`]:
/// `total_tax = activation_threshold * activation_tax / SCALE` and
/// `finish_reward = total_tax * finish_reward_share / SCALE`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorParams {
    /// Reference stake (ledger base units) that the activation tax is levied on.
    pub activation_threshold: u128,

    /// Fraction of `activation_threshold` charged to open a proposal.
    pub activation_tax: u128,

    /// Fraction of the total tax escrowed as the finish reward.
    pub finish_reward_share: u128,

    /// Length of the voting window in seconds.
    pub vote_period_secs: u64,
}

impl GovernorParams {
    /// Default vote period: 3 days.
    pub const DEFAULT_VOTE_PERIOD_SECS: u64 = 3 * 24 * 3600;

    /// 1M token threshold, 5% tax, 10% of the tax as finish reward.
    pub fn crispy_defaults() -> Self {
        Self {
            activation_threshold: units(1_000_000),
            activation_tax: SCALE / 20,
            finish_reward_share: SCALE / 10,
            vote_period_secs: Self::DEFAULT_VOTE_PERIOD_SECS,
        }
    }

    /// Total activation tax, `None` on overflow.
    pub fn total_tax(&self) -> Option<u128> {
        frac_mul(self.activation_threshold, self.activation_tax)
    }

    /// Split of the total tax into `(treasury_tax, finish_reward)`.
    ///
    /// The two legs always sum to the total exactly; rounding from the
    /// fixed-point reward share lands on the treasury leg.
    pub fn tax_split(&self) -> Option<TaxSplit> {
        let total_tax = self.total_tax()?;
        let finish_reward = frac_mul(total_tax, self.finish_reward_share)?;
        let tax = total_tax.checked_sub(finish_reward)?;
        Some(TaxSplit {
            total_tax,
            tax,
            finish_reward,
        })
    }

    /// Whether the fractions are at most one.
    pub fn is_valid(&self) -> bool {
        self.activation_tax <= SCALE && self.finish_reward_share <= SCALE
    }
}

impl Default for GovernorParams {
    fn default() -> Self {
        Self::crispy_defaults()
    }
}

/// Breakdown of one activation's tax.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub total_tax: u128,
    /// Leg paid to the treasury.
    pub tax: u128,
    /// Leg escrowed by the governor for whoever finishes the action.
    pub finish_reward: u128,
}
