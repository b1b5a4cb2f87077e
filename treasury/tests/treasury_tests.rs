use std::any::Any;
use std::collections::BTreeMap;
use std::rc::Rc;

use crispy_chain::{decode_input, encode, Chain, Contract, Deposit, Env, Revert};
use crispy_crypto::{account_address, hash_payload};
use crispy_ledger::{LedgerContract, LedgerEvent, LedgerMsg};
use crispy_nullables::NullClock;
use crispy_treasury::{TreasuryContract, TreasuryEvent, TreasuryMsg};
use crispy_types::{units, Address};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Test assets
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
enum NftMsg {
    Mint { to: Address, id: u128 },
    SafeTransferFrom { from: Address, to: Address, id: u128 },
    OwnerOf { id: u128 },
}

#[derive(Clone, Default)]
struct TestNft {
    owners: BTreeMap<u128, Address>,
}

impl Contract for TestNft {
    fn kind(&self) -> &'static str {
        "test-nft"
    }

    fn execute(&mut self, env: &mut Env<'_>, input: &[u8]) -> Result<Vec<u8>, Revert> {
        match decode_input::<NftMsg>(input)? {
            NftMsg::Mint { to, id } => {
                self.owners.insert(id, to);
                Ok(Vec::new())
            }
            NftMsg::SafeTransferFrom { from, to, id } => {
                if env.caller() != from || self.owners.get(&id) != Some(&from) {
                    return Err(Revert::new("nft.not_owner", "caller does not own the token"));
                }
                self.owners.insert(id, to);
                let deposit = Deposit::NonFungible {
                    asset: env.address(),
                    from,
                    token_id: id,
                };
                env.notify_deposit(to, deposit)
                    .map_err(|e| Revert::new("nft.unsafe_recipient", "rejected").with_cause(e))?;
                Ok(Vec::new())
            }
            NftMsg::OwnerOf { id } => Ok(encode(&self.owners.get(&id).copied())),
        }
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Serialize, Deserialize)]
enum MultiMsg {
    Mint { to: Address, id: u128, amount: u128 },
    SafeTransferFrom { from: Address, to: Address, id: u128, amount: u128 },
    BalanceOf { account: Address, id: u128 },
}

#[derive(Clone, Default)]
struct TestMultiToken {
    balances: BTreeMap<(Address, u128), u128>,
}

impl Contract for TestMultiToken {
    fn kind(&self) -> &'static str {
        "test-multi-token"
    }

    fn execute(&mut self, env: &mut Env<'_>, input: &[u8]) -> Result<Vec<u8>, Revert> {
        match decode_input::<MultiMsg>(input)? {
            MultiMsg::Mint { to, id, amount } => {
                *self.balances.entry((to, id)).or_default() += amount;
                Ok(Vec::new())
            }
            MultiMsg::SafeTransferFrom { from, to, id, amount } => {
                let held = self.balances.get(&(from, id)).copied().unwrap_or(0);
                if env.caller() != from || held < amount {
                    return Err(Revert::new("multi.insufficient", "not enough"));
                }
                self.balances.insert((from, id), held - amount);
                *self.balances.entry((to, id)).or_default() += amount;
                let deposit = Deposit::MultiToken {
                    asset: env.address(),
                    from,
                    token_id: id,
                    amount,
                };
                env.notify_deposit(to, deposit)
                    .map_err(|e| Revert::new("multi.unsafe_recipient", "rejected").with_cause(e))?;
                Ok(Vec::new())
            }
            MultiMsg::BalanceOf { account, id } => {
                Ok(encode(&self.balances.get(&(account, id)).copied().unwrap_or(0)))
            }
        }
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const ACCESS_KEY: u64 = 0xC0FFEE;
const REQUIRED_AMOUNT: u128 = 3_000;

#[derive(Serialize, Deserialize)]
enum TesterMsg {
    Access { key: u64 },
}

/// Payable endpoint that demands an exact value and key.
#[derive(Clone, Default)]
struct PayableTester {
    accessed: bool,
}

impl Contract for PayableTester {
    fn kind(&self) -> &'static str {
        "payable-tester"
    }

    fn execute(&mut self, env: &mut Env<'_>, input: &[u8]) -> Result<Vec<u8>, Revert> {
        let TesterMsg::Access { key } = decode_input(input)?;
        if key != ACCESS_KEY || env.value() != REQUIRED_AMOUNT {
            return Err(Revert::new("tester.denied", "wrong key or amount"));
        }
        self.accessed = true;
        Ok(encode(&true))
    }

    fn clone_box(&self) -> Box<dyn Contract> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

struct Fixture {
    chain: Chain,
    treasury: Address,
    admin1: Address,
    admin2: Address,
    user1: Address,
    user2: Address,
}

fn fixture() -> Fixture {
    let mut chain = Chain::new(Rc::new(NullClock::new(1_000)));
    let admin1 = account_address("admin1");
    let treasury = TreasuryContract::deploy(&mut chain, admin1).unwrap();
    Fixture {
        chain,
        treasury,
        admin1,
        admin2: account_address("admin2"),
        user1: account_address("user1"),
        user2: account_address("user2"),
    }
}

fn call_direct(target: Address, value: u128, payload: Vec<u8>) -> TreasuryMsg {
    TreasuryMsg::CallDirect {
        target,
        value,
        payload,
    }
}

// ---------------------------------------------------------------------------
// Access restriction
// ---------------------------------------------------------------------------

#[test]
fn deployer_is_owner() {
    let mut f = fixture();
    let owner: Address = f.chain.query_msg(f.treasury, &TreasuryMsg::Owner).unwrap();
    assert_eq!(owner, f.admin1);
}

#[test]
fn non_owner_cannot_execute_calls() {
    let mut f = fixture();
    f.chain.fund(f.treasury, units(3)).unwrap();
    let attacker = account_address("attacker1");
    let err = f
        .chain
        .send(attacker, f.treasury, 0, &call_direct(attacker, units(3), vec![]))
        .unwrap_err();
    assert_eq!(err.code(), "treasury.not_owner");
    assert!(err.to_string().contains("Ownable: caller is not the owner"));
    assert_eq!(f.chain.native_balance(&f.treasury), units(3));
}

#[test]
fn ownership_transfer_moves_control() {
    let mut f = fixture();
    f.chain.fund(f.treasury, units(3)).unwrap();
    let receipt = f
        .chain
        .send(
            f.admin1,
            f.treasury,
            0,
            &TreasuryMsg::TransferOwnership { new_owner: f.admin2 },
        )
        .unwrap();
    assert_eq!(
        receipt.decode_events::<TreasuryEvent>(f.treasury),
        vec![TreasuryEvent::OwnershipTransferred {
            previous_owner: f.admin1,
            new_owner: f.admin2
        }]
    );

    let err = f
        .chain
        .send(f.admin1, f.treasury, 0, &call_direct(f.admin1, units(3), vec![]))
        .unwrap_err();
    assert_eq!(err.code(), "treasury.not_owner");

    f.chain
        .send(f.admin2, f.treasury, 0, &call_direct(f.user1, units(1), vec![]))
        .unwrap();
    assert_eq!(f.chain.native_balance(&f.user1), units(1));
}

#[test]
fn ownership_cannot_go_to_zero_but_can_be_renounced() {
    let mut f = fixture();
    let err = f
        .chain
        .send(
            f.admin1,
            f.treasury,
            0,
            &TreasuryMsg::TransferOwnership {
                new_owner: Address::ZERO,
            },
        )
        .unwrap_err();
    assert_eq!(err.code(), "treasury.zero_owner");

    f.chain
        .send(f.admin1, f.treasury, 0, &TreasuryMsg::RenounceOwnership)
        .unwrap();
    let owner: Address = f.chain.query_msg(f.treasury, &TreasuryMsg::Owner).unwrap();
    assert_eq!(owner, Address::ZERO);
}

// ---------------------------------------------------------------------------
// Asset receipt
// ---------------------------------------------------------------------------

#[test]
fn accepts_native_value() {
    let mut f = fixture();
    f.chain.fund(f.user1, units(2)).unwrap();
    let receipt = f
        .chain
        .transfer_native(f.user1, f.treasury, units(1))
        .unwrap();
    assert_eq!(f.chain.native_balance(&f.treasury), units(1));
    assert_eq!(
        receipt.decode_events::<TreasuryEvent>(f.treasury),
        vec![TreasuryEvent::DepositReceived {
            sender: f.user1,
            deposit: Deposit::Native { amount: units(1) }
        }]
    );
}

#[test]
fn accepts_non_fungible_tokens() {
    let mut f = fixture();
    let nft = f.chain.deploy(f.admin1, |_| Ok(TestNft::default())).unwrap();
    f.chain
        .send(f.admin1, nft, 0, &NftMsg::Mint { to: f.user1, id: 1234 })
        .unwrap();
    f.chain
        .send(
            f.user1,
            nft,
            0,
            &NftMsg::SafeTransferFrom {
                from: f.user1,
                to: f.treasury,
                id: 1234,
            },
        )
        .unwrap();
    let owner: Option<Address> = f.chain.query_msg(nft, &NftMsg::OwnerOf { id: 1234 }).unwrap();
    assert_eq!(owner, Some(f.treasury));
}

#[test]
fn accepts_multi_tokens() {
    let mut f = fixture();
    let multi = f
        .chain
        .deploy(f.admin1, |_| Ok(TestMultiToken::default()))
        .unwrap();
    f.chain
        .send(
            f.admin1,
            multi,
            0,
            &MultiMsg::Mint {
                to: f.user1,
                id: 5678,
                amount: 112,
            },
        )
        .unwrap();
    let receipt = f
        .chain
        .send(
            f.user1,
            multi,
            0,
            &MultiMsg::SafeTransferFrom {
                from: f.user1,
                to: f.treasury,
                id: 5678,
                amount: 78,
            },
        )
        .unwrap();
    let held: u128 = f
        .chain
        .query_msg(
            multi,
            &MultiMsg::BalanceOf {
                account: f.treasury,
                id: 5678,
            },
        )
        .unwrap();
    assert_eq!(held, 78);
    assert_eq!(
        receipt.decode_events::<TreasuryEvent>(f.treasury),
        vec![TreasuryEvent::DepositReceived {
            sender: multi,
            deposit: Deposit::MultiToken {
                asset: multi,
                from: f.user1,
                token_id: 5678,
                amount: 78
            }
        }]
    );
}

#[test]
fn accepts_announced_fungible_transfers() {
    let mut f = fixture();
    let token = LedgerContract::deploy(&mut f.chain, f.admin1).unwrap();
    f.chain
        .send(f.admin1, token, 0, &LedgerMsg::Mint { to: f.user1, amount: 50 })
        .unwrap();
    f.chain
        .send(
            f.user1,
            token,
            0,
            &LedgerMsg::SafeTransfer {
                to: f.treasury,
                amount: 50,
            },
        )
        .unwrap();
    let held: u128 = f
        .chain
        .query_msg(token, &LedgerMsg::BalanceOf { account: f.treasury })
        .unwrap();
    assert_eq!(held, 50);
}

// ---------------------------------------------------------------------------
// Arbitrary call execution
// ---------------------------------------------------------------------------

#[test]
fn can_send_fungible_tokens() {
    let mut f = fixture();
    f.chain.fund(f.treasury, units(2)).unwrap();
    let token = LedgerContract::deploy(&mut f.chain, f.admin1).unwrap();
    let amount = units(50);
    f.chain
        .send(f.admin1, token, 0, &LedgerMsg::Mint { to: f.user1, amount })
        .unwrap();
    f.chain
        .send(f.user1, token, 0, &LedgerMsg::Transfer { to: f.treasury, amount })
        .unwrap();

    let payload = encode(&LedgerMsg::Transfer { to: f.user2, amount });
    let receipt = f
        .chain
        .send(f.admin1, f.treasury, 0, &call_direct(token, 0, payload.clone()))
        .unwrap();

    assert_eq!(
        receipt.decode_events::<LedgerEvent>(token),
        vec![LedgerEvent::Transfer {
            from: f.treasury,
            to: f.user2,
            amount
        }]
    );
    assert_eq!(
        receipt.decode_events::<TreasuryEvent>(f.treasury),
        vec![TreasuryEvent::CallExecuted {
            target: token,
            value: 0,
            payload_hash: hash_payload(&payload)
        }]
    );
}

#[test]
fn can_send_native_to_payable_method() {
    let mut f = fixture();
    f.chain.fund(f.treasury, units(2)).unwrap();
    let tester = f
        .chain
        .deploy(f.admin1, |_| Ok(PayableTester::default()))
        .unwrap();

    let payload = encode(&TesterMsg::Access { key: ACCESS_KEY });
    let receipt = f
        .chain
        .send(
            f.admin1,
            f.treasury,
            0,
            &call_direct(tester, REQUIRED_AMOUNT, payload),
        )
        .unwrap();

    // The callee's return data is relayed unchanged.
    assert!(receipt.decode_return::<bool>().unwrap());
    assert!(f.chain.contract::<PayableTester>(&tester).unwrap().accessed);
    assert_eq!(f.chain.native_balance(&tester), REQUIRED_AMOUNT);
    assert_eq!(
        receipt.decode_events::<TreasuryEvent>(f.treasury)[0],
        TreasuryEvent::NativeSent {
            to: tester,
            amount: REQUIRED_AMOUNT
        }
    );
}

#[test]
fn failing_callee_rolls_back_value() {
    let mut f = fixture();
    f.chain.fund(f.treasury, units(2)).unwrap();
    let tester = f
        .chain
        .deploy(f.admin1, |_| Ok(PayableTester::default()))
        .unwrap();

    let payload = encode(&TesterMsg::Access { key: 1 });
    let err = f
        .chain
        .send(
            f.admin1,
            f.treasury,
            0,
            &call_direct(tester, REQUIRED_AMOUNT, payload),
        )
        .unwrap_err();
    assert_eq!(err.code(), "treasury.call_failed");
    assert_eq!(err.root_code(), "tester.denied");
    assert_eq!(f.chain.native_balance(&f.treasury), units(2));
    assert_eq!(f.chain.native_balance(&tester), 0);
}

#[test]
fn can_send_non_fungible_tokens() {
    let mut f = fixture();
    let nft = f.chain.deploy(f.admin1, |_| Ok(TestNft::default())).unwrap();
    f.chain
        .send(f.admin1, nft, 0, &NftMsg::Mint { to: f.treasury, id: 123 })
        .unwrap();

    let payload = encode(&NftMsg::SafeTransferFrom {
        from: f.treasury,
        to: f.user1,
        id: 123,
    });
    f.chain
        .send(f.admin1, f.treasury, 0, &call_direct(nft, 0, payload))
        .unwrap();
    let owner: Option<Address> = f.chain.query_msg(nft, &NftMsg::OwnerOf { id: 123 }).unwrap();
    assert_eq!(owner, Some(f.user1));
}

#[test]
fn can_send_native_to_accounts() {
    let mut f = fixture();
    f.chain.fund(f.treasury, units(2)).unwrap();
    f.chain
        .send(f.admin1, f.treasury, 0, &call_direct(f.user1, units(1), vec![]))
        .unwrap();
    assert_eq!(f.chain.native_balance(&f.user1), units(1));
    assert_eq!(f.chain.native_balance(&f.treasury), units(1));
}

#[test]
fn overspending_native_is_a_boundary_failure() {
    let mut f = fixture();
    f.chain.fund(f.treasury, 10).unwrap();
    let err = f
        .chain
        .send(f.admin1, f.treasury, 0, &call_direct(f.user1, 11, vec![]))
        .unwrap_err();
    assert_eq!(err.root_code(), "boundary.insufficient_value");
    assert_eq!(f.chain.native_balance(&f.treasury), 10);
}
