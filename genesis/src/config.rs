//! Genesis configuration with TOML file support.
//!
//! Amounts are human-scale (whole tokens, basis points) because TOML
//! integers stop at `i64`; they are converted to base units on use.

use crate::error::GenesisError;
use crispy_crypto::account_address;
use crispy_ledger::HARD_CAP;
use crispy_types::{Address, GovernorParams, SCALE, TOKEN_UNIT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Basis points in one whole.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// How the governance system is brought up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Account that deploys everything and performs the initial mints.
    #[serde(default = "default_deployer")]
    pub deployer: Address,

    /// Whole native tokens the deployer sends to the treasury after setup.
    #[serde(default = "default_treasury_native_tokens")]
    pub treasury_native_tokens: u64,

    /// Initial distribution of the hard cap.
    #[serde(default = "default_allocations")]
    pub allocations: Vec<Allocation>,

    #[serde(default)]
    pub governor: GovernorParamsConfig,
}

/// A share of the hard cap minted to one recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub recipient: Recipient,
    pub bps: u32,
}

/// `"treasury"`, `"deployer"`, or a `0x`-prefixed account address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Recipient {
    Treasury,
    Deployer,
    Account(Address),
}

/// Governor constants as written in TOML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorParamsConfig {
    /// Whole tokens.
    #[serde(default = "default_activation_threshold")]
    pub activation_threshold: u64,

    #[serde(default = "default_activation_tax_bps")]
    pub activation_tax_bps: u32,

    /// Share of the total tax paid to the finisher.
    #[serde(default = "default_finish_reward_bps")]
    pub finish_reward_bps: u32,

    #[serde(default = "default_vote_period_secs")]
    pub vote_period_secs: u64,
}

// ── Defaults ───────────────────────────────────────────────────────────

fn default_deployer() -> Address {
    account_address("admin1")
}

fn default_treasury_native_tokens() -> u64 {
    2
}

/// Treasury 30%, deployer 18%, four community holders 13% each.
fn default_allocations() -> Vec<Allocation> {
    let mut allocations = vec![
        Allocation {
            recipient: Recipient::Treasury,
            bps: 3_000,
        },
        Allocation {
            recipient: Recipient::Deployer,
            bps: 1_800,
        },
    ];
    for label in ["admin2", "user1", "user2", "user3"] {
        allocations.push(Allocation {
            recipient: Recipient::Account(account_address(label)),
            bps: 1_300,
        });
    }
    allocations
}

fn default_activation_threshold() -> u64 {
    1_000_000
}

fn default_activation_tax_bps() -> u32 {
    500
}

fn default_finish_reward_bps() -> u32 {
    1_000
}

fn default_vote_period_secs() -> u64 {
    GovernorParams::DEFAULT_VOTE_PERIOD_SECS
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GenesisConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GenesisError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| GenesisError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, GenesisError> {
        toml::from_str(s).map_err(|e| GenesisError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, GenesisError> {
        toml::to_string_pretty(self).map_err(|e| GenesisError::Config(e.to_string()))
    }

    /// Summed as `u64`.
    pub fn total_bps(&self) -> u64 {
        self.allocations.iter().map(|a| u64::from(a.bps)).sum()
    }

    /// Check allocations and governor parameters without deploying anything.
    pub fn validate(&self) -> Result<GovernorParams, GenesisError> {
        let total_bps = self.total_bps();
        if total_bps > u64::from(BPS_DENOMINATOR) {
            return Err(GenesisError::AllocationsExceedSupply { total_bps });
        }
        self.governor.to_params()
    }

    /// Native funding for the treasury in base units.
    pub fn treasury_native_funding(&self) -> u128 {
        u128::from(self.treasury_native_tokens) * TOKEN_UNIT
    }
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            deployer: default_deployer(),
            treasury_native_tokens: default_treasury_native_tokens(),
            allocations: default_allocations(),
            governor: GovernorParamsConfig::default(),
        }
    }
}

impl Allocation {
    /// Base units of the hard cap this allocation mints.
    pub fn amount(&self) -> u128 {
        HARD_CAP / u128::from(BPS_DENOMINATOR) * u128::from(self.bps)
    }
}

impl GovernorParamsConfig {
    pub fn to_params(&self) -> Result<GovernorParams, GenesisError> {
        if self.activation_tax_bps > BPS_DENOMINATOR || self.finish_reward_bps > BPS_DENOMINATOR {
            return Err(GenesisError::InvalidParams("rate above 10000 bps"));
        }
        if self.vote_period_secs == 0 {
            return Err(GenesisError::InvalidParams("vote period must be non-zero"));
        }
        let per_bps = SCALE / u128::from(BPS_DENOMINATOR);
        Ok(GovernorParams {
            activation_threshold: u128::from(self.activation_threshold) * TOKEN_UNIT,
            activation_tax: per_bps * u128::from(self.activation_tax_bps),
            finish_reward_share: per_bps * u128::from(self.finish_reward_bps),
            vote_period_secs: self.vote_period_secs,
        })
    }
}

impl Default for GovernorParamsConfig {
    fn default() -> Self {
        Self {
            activation_threshold: default_activation_threshold(),
            activation_tax_bps: default_activation_tax_bps(),
            finish_reward_bps: default_finish_reward_bps(),
            vote_period_secs: default_vote_period_secs(),
        }
    }
}

impl Recipient {
    pub fn resolve(&self, deployer: Address, treasury: Address) -> Address {
        match self {
            Self::Treasury => treasury,
            Self::Deployer => deployer,
            Self::Account(address) => *address,
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treasury => f.write_str("treasury"),
            Self::Deployer => f.write_str("deployer"),
            Self::Account(address) => write!(f, "{address}"),
        }
    }
}

impl FromStr for Recipient {
    type Err = GenesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "treasury" => Ok(Self::Treasury),
            "deployer" => Ok(Self::Deployer),
            other => other
                .parse()
                .map(Self::Account)
                .map_err(|e| GenesisError::Config(format!("recipient {other:?}: {e}"))),
        }
    }
}

impl TryFrom<String> for Recipient {
    type Error = GenesisError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Recipient> for String {
    fn from(r: Recipient) -> Self {
        r.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crispy_types::units;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = GenesisConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = GenesisConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = GenesisConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config, GenesisConfig::default());
        assert_eq!(config.total_bps(), 10_000);
        assert_eq!(config.validate().unwrap(), GovernorParams::crispy_defaults());
    }

    #[test]
    fn defaults_mint_the_whole_cap() {
        let config = GenesisConfig::default();
        let total: u128 = config.allocations.iter().map(Allocation::amount).sum();
        assert_eq!(total, HARD_CAP);
        assert_eq!(config.allocations[0].amount(), units(30_000_000));
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            treasury_native_tokens = 5

            [governor]
            vote_period_secs = 600
            activation_tax_bps = 100

            [[allocations]]
            recipient = "treasury"
            bps = 4000

            [[allocations]]
            recipient = "0x00000000000000000000000000000000000000aa"
            bps = 6000
        "#;
        let config = GenesisConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.treasury_native_tokens, 5);
        assert_eq!(config.governor.vote_period_secs, 600);
        assert_eq!(config.governor.finish_reward_bps, 1_000);
        assert_eq!(config.allocations.len(), 2);
        let mut aa = [0u8; 20];
        aa[19] = 0xaa;
        assert_eq!(config.allocations[1].recipient, Recipient::Account(Address::new(aa)));
        assert_eq!(config.deployer, default_deployer());

        let params = config.validate().unwrap();
        assert_eq!(params.activation_tax, SCALE / 100);
        assert_eq!(params.vote_period_secs, 600);
    }

    #[test]
    fn bad_recipient_is_a_config_error() {
        let toml = r#"
            [[allocations]]
            recipient = "vault"
            bps = 10
        "#;
        assert!(matches!(
            GenesisConfig::from_toml_str(toml),
            Err(GenesisError::Config(_))
        ));
    }

    #[test]
    fn over_allocation_rejected() {
        let mut config = GenesisConfig::default();
        config.allocations.push(Allocation {
            recipient: Recipient::Deployer,
            bps: 1,
        });
        assert!(matches!(
            config.validate(),
            Err(GenesisError::AllocationsExceedSupply { total_bps: 10_001 })
        ));
    }

    #[test]
    fn huge_allocations_are_rejected_not_overflowed() {
        let mut config = GenesisConfig::default();
        config.allocations = vec![
            Allocation {
                recipient: Recipient::Treasury,
                bps: u32::MAX,
            },
            Allocation {
                recipient: Recipient::Deployer,
                bps: u32::MAX,
            },
        ];
        let expected = 2 * u64::from(u32::MAX);
        assert!(matches!(
            config.validate(),
            Err(GenesisError::AllocationsExceedSupply { total_bps }) if total_bps == expected
        ));
    }

    #[test]
    fn rates_above_one_rejected() {
        let mut config = GenesisConfig::default();
        config.governor.finish_reward_bps = 10_001;
        assert!(matches!(config.validate(), Err(GenesisError::InvalidParams(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = GenesisConfig::from_toml_file("/nonexistent/genesis.toml");
        assert!(matches!(result, Err(GenesisError::Config(_))));
    }
}
