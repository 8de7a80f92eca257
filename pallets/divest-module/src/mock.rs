extern crate alloc;

use crate as pallet_divest_module;
use polkadot_sdk::frame_support::{
  construct_runtime, derive_impl,
  traits::{ConstU32, ConstU64, ConstU128, Get},
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{
  BasisPoints, EpochId,
  ecosystem::params::{
    DIVEST_DEFAULT_WEEKLY_SPOT_AMOUNT, DIVEST_DEFAULT_WITHDRAWABLE_FACTOR, DIVEST_MAX_EXECUTORS,
    DIVEST_MAX_WITHDRAWABLE_FACTOR, EPOCH_DURATION_SECS,
  },
};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

pub const GOVERNANCE: u64 = 1;
/// Guardian and operator executor
pub const TECHOPS: u64 = 2;
pub const KEEPER: u64 = 3;
/// Position holder whose units get divested
pub const VOTER: u64 = 10;
pub const TREASURY: u64 = 20;
pub const RANDOM: u64 = 99;

/// Custody epoch in effect when a test starts
pub const GENESIS_EPOCH: EpochId = 1;

// State containers for the custody fake
thread_local! {
    // Position units per holder
    pub static POSITIONS: RefCell<BTreeMap<u64, u128>> = const { RefCell::new(BTreeMap::new()) };

    // Liquid asset per account, credited by withdrawals
    pub static LIQUID: RefCell<BTreeMap<u64, u128>> = const { RefCell::new(BTreeMap::new()) };

    // Wall clock in seconds and the last checkpointed epoch
    static CLOCK: RefCell<u64> = const { RefCell::new(0) };
    static EPOCH: RefCell<EpochId> = const { RefCell::new(GENESIS_EPOCH) };

    // Module authorization and withdrawal allow-list
    static MODULE_ENABLED: RefCell<bool> = const { RefCell::new(true) };
    static ALLOWLIST: RefCell<BTreeSet<u64>> = const { RefCell::new(BTreeSet::new()) };

    // Liquid asset paid per position unit
    static REDEMPTION_RATE: RefCell<BasisPoints> = const { RefCell::new(BasisPoints::from_bps(10_000)) };
}

// Helper methods to setup state
pub fn set_position(who: u64, units: u128) {
  POSITIONS.with(|p| p.borrow_mut().insert(who, units));
}

pub fn position_of(who: u64) -> u128 {
  POSITIONS.with(|p| p.borrow().get(&who).copied().unwrap_or_default())
}

pub fn liquid_of(who: u64) -> u128 {
  LIQUID.with(|l| l.borrow().get(&who).copied().unwrap_or_default())
}

pub fn set_module_enabled(enabled: bool) {
  MODULE_ENABLED.with(|m| *m.borrow_mut() = enabled);
}

pub fn set_allowlisted(who: u64, allowed: bool) {
  ALLOWLIST.with(|a| {
    if allowed {
      a.borrow_mut().insert(who);
    } else {
      a.borrow_mut().remove(&who);
    }
  });
}

pub fn set_redemption_rate(rate: BasisPoints) {
  REDEMPTION_RATE.with(|r| *r.borrow_mut() = rate);
}

/// Move the custody clock forward without checkpointing
pub fn advance_time(secs: u64) {
  CLOCK.with(|c| *c.borrow_mut() += secs);
}

/// Roll the custody epoch to whatever the clock says
pub fn checkpoint_epoch() {
  let now = CLOCK.with(|c| *c.borrow());
  EPOCH.with(|e| *e.borrow_mut() = GENESIS_EPOCH + now / EPOCH_DURATION_SECS);
}

/// One week later, checkpointed
pub fn next_epoch() {
  advance_time(EPOCH_DURATION_SECS);
  checkpoint_epoch();
}

pub fn current_epoch() -> EpochId {
  EPOCH.with(|e| *e.borrow())
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    DivestModule: pallet_divest_module,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
}

pub struct MockCustody;
impl pallet_divest_module::CustodyApi<u64, u128> for MockCustody {
  fn balance_of(who: &u64) -> u128 {
    position_of(*who)
  }

  fn withdraw(amount: u128, source: &u64, destination: &u64) -> Result<u128, DispatchError> {
    if !ALLOWLIST.with(|a| a.borrow().contains(source)) {
      return Err(DispatchError::Other("not-allowlisted"));
    }
    let held = position_of(*source);
    if held < amount {
      return Err(DispatchError::Other("insufficient-position"));
    }
    set_position(*source, held - amount);

    let proceeds = REDEMPTION_RATE.with(|r| r.borrow().mul_floor(amount));
    LIQUID.with(|l| *l.borrow_mut().entry(*destination).or_default() += proceeds);
    Ok(proceeds)
  }

  fn current_epoch() -> EpochId {
    current_epoch()
  }

  fn is_module_enabled(_source: &u64) -> bool {
    MODULE_ENABLED.with(|m| *m.borrow())
  }
}

pub struct MaxWithdrawableFactorStub;
impl Get<BasisPoints> for MaxWithdrawableFactorStub {
  fn get() -> BasisPoints {
    DIVEST_MAX_WITHDRAWABLE_FACTOR
  }
}

pub struct DefaultWithdrawableFactorStub;
impl Get<BasisPoints> for DefaultWithdrawableFactorStub {
  fn get() -> BasisPoints {
    DIVEST_DEFAULT_WITHDRAWABLE_FACTOR
  }
}

impl pallet_divest_module::Config for Test {
  type Custody = MockCustody;
  type Source = ConstU64<VOTER>;
  type Treasury = ConstU64<TREASURY>;
  type MaxWithdrawableFactor = MaxWithdrawableFactorStub;
  type DefaultWithdrawableFactor = DefaultWithdrawableFactorStub;
  type DefaultWeeklySpotAmount = ConstU128<DIVEST_DEFAULT_WEEKLY_SPOT_AMOUNT>;
  type MaxExecutors = ConstU32<DIVEST_MAX_EXECUTORS>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = DivestModuleBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct DivestModuleBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<u64> for DivestModuleBenchmarkHelper {
  fn prepare_upkeep(source: &u64) -> polkadot_sdk::sp_runtime::DispatchResult {
    set_position(*source, 10_000 * primitives::ecosystem::params::PRECISION);
    set_allowlisted(*source, true);
    set_module_enabled(true);
    next_epoch();
    Ok(())
  }
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  pallet_divest_module::GenesisConfig::<Test> {
    governance: Some(GOVERNANCE),
    guardian: Some(TECHOPS),
    executors: alloc::vec![TECHOPS, KEEPER],
    withdrawable_factor: None,
    weekly_spot_amount: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  // Reset State
  POSITIONS.with(|p| p.borrow_mut().clear());
  LIQUID.with(|l| l.borrow_mut().clear());
  CLOCK.with(|c| *c.borrow_mut() = 0);
  EPOCH.with(|e| *e.borrow_mut() = GENESIS_EPOCH);
  MODULE_ENABLED.with(|m| *m.borrow_mut() = true);
  ALLOWLIST.with(|a| {
    let mut allowlist = a.borrow_mut();
    allowlist.clear();
    allowlist.insert(VOTER);
  });
  REDEMPTION_RATE.with(|r| *r.borrow_mut() = BasisPoints::from_bps(10_000));

  t.into()
}
