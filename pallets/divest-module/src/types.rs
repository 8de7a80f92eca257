use frame::deps::sp_runtime::DispatchError;
use frame::prelude::{BoundedVec, ConstU32};
use primitives::{EpochId, ecosystem::params::DIVEST_MAX_PERFORM_DATA_LEN};

/// Opaque keeper payload passed from `check_upkeep` to `perform_upkeep`
pub type PerformData = BoundedVec<u8, ConstU32<DIVEST_MAX_PERFORM_DATA_LEN>>;

/// Narrow capability interface onto the external custody system.
///
/// The custody system owns the yield-bearing position, the epoch counter that paces
/// divestments, and the authorization that lets this module act on behalf of the
/// position holder. The pallet never caches any of these values.
pub trait CustodyApi<AccountId, Balance> {
  /// Position units currently held by `who`
  fn balance_of(who: &AccountId) -> Balance;

  /// Withdraw `amount` position units held by `source` and credit the liquid proceeds
  /// to `destination`.
  ///
  /// Returns the amount of liquid asset credited to `destination`. Fails if custody
  /// refuses the withdrawal (e.g. `source` is not allow-listed).
  fn withdraw(
    amount: Balance,
    source: &AccountId,
    destination: &AccountId,
  ) -> Result<Balance, DispatchError>;

  /// Current custody epoch, advanced by a weekly checkpoint outside this module
  fn current_epoch() -> EpochId;

  /// Whether custody still authorizes this module to move funds held by `source`
  fn is_module_enabled(source: &AccountId) -> bool;
}

/// Authorization tier required by a call.
///
/// Every dispatchable declares exactly one tier and checks it before anything else.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthTier {
  /// Governance only
  Governance,
  /// Governance or the guardian
  GovernanceOrGuardian,
  /// Governance or any executor
  GovernanceOrExecutor,
  /// Any executor (routine upkeep)
  Executor,
}

impl AuthTier {
  /// Stable revert reason reported to callers failing this tier
  pub const fn reason(&self) -> &'static str {
    match self {
      AuthTier::Governance => "not-governance!",
      AuthTier::GovernanceOrGuardian => "not-gov-or-guardian",
      AuthTier::GovernanceOrExecutor => "not-gov-or-executor",
      AuthTier::Executor => "not-executor!",
    }
  }
}
