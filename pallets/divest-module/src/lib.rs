//! Divest Module Pallet
//!
//! Keeper-driven divestment of a yield-bearing custody position into the treasury's liquid
//! asset, at most once per custody epoch, behind role-based permissions and an emergency pause.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod types;
pub use types::{AuthTier, CustodyApi, PerformData};

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

/// Log target for node-side diagnostics
pub const LOG_TARGET: &str = "runtime::divest-module";

/// Helper for benchmarking
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  /// Seed custody so that an upkeep for `source` is due and withdraws a non-zero amount.
  fn prepare_upkeep(source: &AccountId) -> frame::deps::sp_runtime::DispatchResult;
}

#[frame::pallet]
pub mod pallet {
  use super::{AuthTier, CustodyApi, LOG_TARGET, PerformData, WeightInfo};
  use alloc::vec::Vec;
  use frame::deps::sp_runtime::DispatchError;
  use frame::prelude::*;
  use primitives::{BasisPoints, EpochId};

  /// Configuration trait for the divest module pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// External custody system holding the position and paying out the proceeds
    type Custody: CustodyApi<Self::AccountId, u128>;

    /// Account whose position is divested (the custody "voter")
    #[pallet::constant]
    type Source: Get<Self::AccountId>;

    /// Account receiving the liquid proceeds
    #[pallet::constant]
    type Treasury: Get<Self::AccountId>;

    /// Upper bound for the withdrawable factor
    #[pallet::constant]
    type MaxWithdrawableFactor: Get<BasisPoints>;

    /// Withdrawable factor used until executors or governance set one
    #[pallet::constant]
    type DefaultWithdrawableFactor: Get<BasisPoints>;

    /// Per-cycle withdrawal cap used until executors or governance set one
    #[pallet::constant]
    type DefaultWeeklySpotAmount: Get<u128>;

    /// Maximum number of executors
    #[pallet::constant]
    type MaxExecutors: Get<u32>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Helper for benchmarking
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  /// The pallet struct
  ///
  /// ## Roles
  /// - **Governance**: single account; manages roles, transfers itself, lifts the pause.
  /// - **Guardian**: single account; may only pause.
  /// - **Executors**: keepers and operators; run upkeep and tune the withdrawal policy.
  ///
  /// ## Upkeep
  /// A keeper polls [`Pallet::check_upkeep`] and, once the custody epoch has moved past
  /// `LastEpochIdWithdrawn`, submits `perform_upkeep`. The cycle withdraws
  /// `min(balance * factor, weekly spot amount)` from the source position and routes the
  /// proceeds to the treasury. Either the withdrawal and the epoch marker both land, or
  /// neither does.
  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Governance account
  #[pallet::storage]
  pub type Governance<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Guardian account
  #[pallet::storage]
  pub type Guardian<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Executor set
  #[pallet::storage]
  pub type Executors<T: Config> =
    CountedStorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

  /// Fraction of the position eligible for withdrawal per cycle
  #[pallet::storage]
  pub type WithdrawableFactor<T: Config> =
    StorageValue<_, BasisPoints, ValueQuery, T::DefaultWithdrawableFactor>;

  /// Per-cycle cap on withdrawn position units
  #[pallet::storage]
  pub type WeeklySpotAmount<T: Config> =
    StorageValue<_, u128, ValueQuery, T::DefaultWeeklySpotAmount>;

  /// Custody epoch of the last successful divestment (0 = never)
  #[pallet::storage]
  pub type LastEpochIdWithdrawn<T: Config> = StorageValue<_, EpochId, ValueQuery>;

  /// Emergency pause flag
  #[pallet::storage]
  pub type Paused<T: Config> = StorageValue<_, bool, ValueQuery>;

  /// Events for the divest module pallet
  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Executor added
    ExecutorAdded { who: T::AccountId },
    /// Executor removed
    ExecutorRemoved { who: T::AccountId },
    /// Guardian replaced
    GuardianUpdated {
      old_guardian: Option<T::AccountId>,
      new_guardian: T::AccountId,
    },
    /// Governance handed over
    GovernanceTransferred {
      old_governance: T::AccountId,
      new_governance: T::AccountId,
    },
    /// Withdrawable factor updated
    WithdrawableFactorUpdated {
      old_factor: BasisPoints,
      new_factor: BasisPoints,
    },
    /// Weekly spot amount updated
    WeeklySpotAmountUpdated { old_amount: u128, new_amount: u128 },
    /// Upkeep halted
    Paused { by: T::AccountId },
    /// Upkeep resumed
    Unpaused { by: T::AccountId },
    /// Divestment executed for a custody epoch
    UpkeepPerformed {
      epoch_id: EpochId,
      withdrawn: u128,
      proceeds: u128,
    },
  }

  /// Errors for the divest module pallet
  #[pallet::error]
  pub enum Error<T> {
    /// Caller is not governance
    NotGovernance,
    /// Caller is neither governance nor guardian
    NotGovernanceOrGuardian,
    /// Caller is neither governance nor an executor
    NotGovernanceOrExecutor,
    /// Caller is not an executor
    NotExecutor,
    /// Withdrawable factor above `MaxWithdrawableFactor`
    WithdrawableFactorOutOfBounds,
    /// Upkeep is paused
    ModulePaused,
    /// Custody no longer authorizes this module
    NoModuleEnabled,
    /// Custody epoch has not advanced since the last divestment
    UpkeepNotNeeded,
    /// Executor set is full
    TooManyExecutors,
  }

  impl<T> Error<T> {
    /// Stable revert reason for keepers and operators
    pub fn reason(&self) -> &'static str {
      match self {
        Self::NotGovernance => AuthTier::Governance.reason(),
        Self::NotGovernanceOrGuardian => AuthTier::GovernanceOrGuardian.reason(),
        Self::NotGovernanceOrExecutor => AuthTier::GovernanceOrExecutor.reason(),
        Self::NotExecutor => AuthTier::Executor.reason(),
        Self::WithdrawableFactorOutOfBounds => "factor-out-of-bounds",
        Self::ModulePaused => "Pausable: paused",
        Self::NoModuleEnabled => "no-module-enabled!",
        Self::UpkeepNotNeeded => "upkeep-not-needed",
        Self::TooManyExecutors => "too-many-executors",
        _ => "unknown",
      }
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Add an executor (governance only)
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::add_executor())]
    pub fn add_executor(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      Self::ensure_tier(origin, AuthTier::Governance)?;
      if Executors::<T>::contains_key(&who) {
        return Ok(());
      }
      ensure!(
        Executors::<T>::count() < T::MaxExecutors::get(),
        Error::<T>::TooManyExecutors
      );
      Executors::<T>::insert(&who, ());
      Self::deposit_event(Event::ExecutorAdded { who });
      Ok(())
    }

    /// Remove an executor (governance only)
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::remove_executor())]
    pub fn remove_executor(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      Self::ensure_tier(origin, AuthTier::Governance)?;
      if Executors::<T>::take(&who).is_some() {
        Self::deposit_event(Event::ExecutorRemoved { who });
      }
      Ok(())
    }

    /// Replace the guardian (governance only)
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_guardian())]
    pub fn set_guardian(origin: OriginFor<T>, guardian: T::AccountId) -> DispatchResult {
      Self::ensure_tier(origin, AuthTier::Governance)?;
      let old_guardian = Guardian::<T>::get();
      if old_guardian.as_ref() == Some(&guardian) {
        return Ok(());
      }
      Guardian::<T>::put(&guardian);
      Self::deposit_event(Event::GuardianUpdated {
        old_guardian,
        new_guardian: guardian,
      });
      Ok(())
    }

    /// Hand governance over to another account (governance only)
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::transfer_governance())]
    pub fn transfer_governance(
      origin: OriginFor<T>,
      new_governance: T::AccountId,
    ) -> DispatchResult {
      let old_governance = Self::ensure_tier(origin, AuthTier::Governance)?;
      if old_governance == new_governance {
        return Ok(());
      }
      Governance::<T>::put(&new_governance);
      Self::deposit_event(Event::GovernanceTransferred {
        old_governance,
        new_governance,
      });
      Ok(())
    }

    /// Update the withdrawable factor (governance or executor)
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_withdrawable_factor())]
    pub fn set_withdrawable_factor(origin: OriginFor<T>, new_factor: BasisPoints) -> DispatchResult {
      Self::ensure_tier(origin, AuthTier::GovernanceOrExecutor)?;
      ensure!(
        new_factor <= T::MaxWithdrawableFactor::get(),
        Error::<T>::WithdrawableFactorOutOfBounds
      );
      let old_factor = WithdrawableFactor::<T>::get();
      WithdrawableFactor::<T>::put(new_factor);
      Self::deposit_event(Event::WithdrawableFactorUpdated {
        old_factor,
        new_factor,
      });
      Ok(())
    }

    /// Update the per-cycle withdrawal cap (governance or executor)
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::set_weekly_spot_amount())]
    pub fn set_weekly_spot_amount(origin: OriginFor<T>, new_amount: u128) -> DispatchResult {
      Self::ensure_tier(origin, AuthTier::GovernanceOrExecutor)?;
      let old_amount = WeeklySpotAmount::<T>::get();
      WeeklySpotAmount::<T>::put(new_amount);
      Self::deposit_event(Event::WeeklySpotAmountUpdated {
        old_amount,
        new_amount,
      });
      Ok(())
    }

    /// Halt upkeep (governance or guardian)
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::pause())]
    pub fn pause(origin: OriginFor<T>) -> DispatchResult {
      let by = Self::ensure_tier(origin, AuthTier::GovernanceOrGuardian)?;
      if !Paused::<T>::get() {
        Paused::<T>::put(true);
        log::info!(target: LOG_TARGET, "upkeep paused by {:?}", by);
        Self::deposit_event(Event::Paused { by });
      }
      Ok(())
    }

    /// Resume upkeep (governance only)
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::unpause())]
    pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
      let by = Self::ensure_tier(origin, AuthTier::Governance)?;
      if Paused::<T>::get() {
        Paused::<T>::put(false);
        log::info!(target: LOG_TARGET, "upkeep resumed by {:?}", by);
        Self::deposit_event(Event::Unpaused { by });
      }
      Ok(())
    }

    /// Divest for the current custody epoch (executor only)
    ///
    /// `perform_data` is accepted for keeper compatibility and ignored. Its length is bounded
    /// at decode time, so the weight does not depend on it.
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::perform_upkeep())]
    pub fn perform_upkeep(origin: OriginFor<T>, _perform_data: PerformData) -> DispatchResult {
      Self::ensure_tier(origin, AuthTier::Executor)?;
      Self::ensure_running()?;
      let source = T::Source::get();
      if !T::Custody::is_module_enabled(&source) {
        log::warn!(
          target: LOG_TARGET,
          "custody revoked module authorization for {:?}",
          source
        );
        return Err(Error::<T>::NoModuleEnabled.into());
      }
      let epoch_id = T::Custody::current_epoch();
      let last_withdrawn = LastEpochIdWithdrawn::<T>::get();
      if !Self::is_upkeep_needed(epoch_id, last_withdrawn) {
        log::debug!(
          target: LOG_TARGET,
          "premature upkeep: epoch {} already divested (last {})",
          epoch_id,
          last_withdrawn
        );
        return Err(Error::<T>::UpkeepNotNeeded.into());
      }
      Self::do_divest(epoch_id, &source)
    }
  }

  #[pallet::view_functions]
  impl<T: Config> Pallet<T> {
    /// Current governance account
    pub fn governance() -> Option<T::AccountId> {
      Governance::<T>::get()
    }

    /// Current guardian account
    pub fn guardian() -> Option<T::AccountId> {
      Guardian::<T>::get()
    }

    /// Whether `who` is governance
    pub fn is_governance(who: T::AccountId) -> bool {
      Self::governs(&who)
    }

    /// Whether `who` is the guardian
    pub fn is_guardian(who: T::AccountId) -> bool {
      Self::guards(&who)
    }

    /// Whether `who` is an executor
    pub fn is_executor(who: T::AccountId) -> bool {
      Self::executes(&who)
    }

    /// All executors, in storage order
    pub fn get_executors() -> Vec<T::AccountId> {
      Executors::<T>::iter_keys().collect()
    }

    /// Fraction of the position eligible per cycle
    pub fn withdrawable_factor() -> BasisPoints {
      WithdrawableFactor::<T>::get()
    }

    /// Per-cycle cap on withdrawn position units
    pub fn weekly_spot_amount() -> u128 {
      WeeklySpotAmount::<T>::get()
    }

    /// Custody epoch of the last divestment (0 = never)
    pub fn last_epoch_id_withdrawn() -> EpochId {
      LastEpochIdWithdrawn::<T>::get()
    }

    /// Whether upkeep is halted
    pub fn paused() -> bool {
      Paused::<T>::get()
    }

    /// Keeper-facing due check; the payload is always empty.
    pub fn check_upkeep() -> (bool, PerformData) {
      let needed =
        Self::is_upkeep_needed(T::Custody::current_epoch(), LastEpochIdWithdrawn::<T>::get());
      (needed, PerformData::default())
    }
  }

  impl<T: Config> Pallet<T> {
    fn governs(who: &T::AccountId) -> bool {
      Governance::<T>::get().as_ref() == Some(who)
    }

    fn guards(who: &T::AccountId) -> bool {
      Guardian::<T>::get().as_ref() == Some(who)
    }

    fn executes(who: &T::AccountId) -> bool {
      Executors::<T>::contains_key(who)
    }

    /// Due once custody has moved past the last divested epoch
    pub fn is_upkeep_needed(current_epoch: EpochId, last_withdrawn: EpochId) -> bool {
      current_epoch > last_withdrawn
    }

    /// Position units to withdraw this cycle: `min(balance * factor, spot_cap)`
    pub fn divest_amount(balance: u128, factor: BasisPoints, spot_cap: u128) -> u128 {
      factor.mul_floor(balance).min(spot_cap)
    }

    /// Resolve the signed caller and check it against `tier`.
    ///
    /// Runs before any pause or business check, so unauthorized callers always see the
    /// tier-specific error.
    pub(crate) fn ensure_tier(
      origin: OriginFor<T>,
      tier: AuthTier,
    ) -> Result<T::AccountId, DispatchError> {
      let who = ensure_signed(origin)?;
      let allowed = match tier {
        AuthTier::Governance => Self::governs(&who),
        AuthTier::GovernanceOrGuardian => Self::governs(&who) || Self::guards(&who),
        AuthTier::GovernanceOrExecutor => Self::governs(&who) || Self::executes(&who),
        AuthTier::Executor => Self::executes(&who),
      };
      if !allowed {
        log::debug!(target: LOG_TARGET, "rejected {:?}: {}", who, tier.reason());
        let error = match tier {
          AuthTier::Governance => Error::<T>::NotGovernance,
          AuthTier::GovernanceOrGuardian => Error::<T>::NotGovernanceOrGuardian,
          AuthTier::GovernanceOrExecutor => Error::<T>::NotGovernanceOrExecutor,
          AuthTier::Executor => Error::<T>::NotExecutor,
        };
        return Err(error.into());
      }
      Ok(who)
    }

    pub(crate) fn ensure_running() -> DispatchResult {
      ensure!(!Paused::<T>::get(), Error::<T>::ModulePaused);
      Ok(())
    }

    /// Withdraw this epoch's allowance and record the epoch.
    ///
    /// All reads happen first; the only fallible step is the custody withdrawal, and the
    /// epoch marker is written after it succeeds.
    fn do_divest(epoch_id: EpochId, source: &T::AccountId) -> DispatchResult {
      let balance = T::Custody::balance_of(source);
      let withdrawn = Self::divest_amount(
        balance,
        WithdrawableFactor::<T>::get(),
        WeeklySpotAmount::<T>::get(),
      );
      let proceeds = if withdrawn == 0 {
        log::debug!(
          target: LOG_TARGET,
          "epoch {}: nothing to divest (balance {})",
          epoch_id,
          balance
        );
        0
      } else {
        T::Custody::withdraw(withdrawn, source, &T::Treasury::get())?
      };
      LastEpochIdWithdrawn::<T>::put(epoch_id);
      log::info!(
        target: LOG_TARGET,
        "epoch {}: divested {} position units for {} proceeds",
        epoch_id,
        withdrawn,
        proceeds
      );
      Self::deposit_event(Event::UpkeepPerformed {
        epoch_id,
        withdrawn,
        proceeds,
      });
      Ok(())
    }
  }

  /// Genesis configuration: initial roles and optional policy overrides
  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    pub governance: Option<T::AccountId>,
    pub guardian: Option<T::AccountId>,
    pub executors: Vec<T::AccountId>,
    pub withdrawable_factor: Option<BasisPoints>,
    pub weekly_spot_amount: Option<u128>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      if let Some(governance) = &self.governance {
        Governance::<T>::put(governance);
      }
      if let Some(guardian) = &self.guardian {
        Guardian::<T>::put(guardian);
      }
      for who in &self.executors {
        Executors::<T>::insert(who, ());
      }
      assert!(
        Executors::<T>::count() <= T::MaxExecutors::get(),
        "genesis executors exceed MaxExecutors"
      );
      if let Some(factor) = self.withdrawable_factor {
        assert!(
          factor <= T::MaxWithdrawableFactor::get(),
          "genesis withdrawable factor exceeds MaxWithdrawableFactor"
        );
        WithdrawableFactor::<T>::put(factor);
      }
      if let Some(amount) = self.weekly_spot_amount {
        WeeklySpotAmount::<T>::put(amount);
      }
    }
  }
}
