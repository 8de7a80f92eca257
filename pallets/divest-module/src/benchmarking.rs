use crate::*;
use frame::deps::frame_benchmarking::{account, v2::*};
use frame::deps::frame_support::traits::Get;
use frame::deps::frame_system::RawOrigin;
use primitives::BasisPoints;

fn install_governance<T: Config>() -> T::AccountId {
  let governance: T::AccountId = whitelisted_caller();
  Governance::<T>::put(&governance);
  governance
}

fn install_executor<T: Config>() -> T::AccountId {
  let executor: T::AccountId = account("executor", 0, 0);
  Executors::<T>::insert(&executor, ());
  executor
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn add_executor() {
    let governance = install_governance::<T>();
    let executor: T::AccountId = account("executor", 1, 0);

    #[extrinsic_call]
    add_executor(RawOrigin::Signed(governance), executor.clone());

    assert!(Pallet::<T>::is_executor(executor));
  }

  #[benchmark]
  fn remove_executor() {
    let governance = install_governance::<T>();
    let executor = install_executor::<T>();

    #[extrinsic_call]
    remove_executor(RawOrigin::Signed(governance), executor.clone());

    assert!(!Pallet::<T>::is_executor(executor));
  }

  #[benchmark]
  fn set_guardian() {
    let governance = install_governance::<T>();
    let guardian: T::AccountId = account("guardian", 0, 0);

    #[extrinsic_call]
    set_guardian(RawOrigin::Signed(governance), guardian.clone());

    assert!(Pallet::<T>::is_guardian(guardian));
  }

  #[benchmark]
  fn transfer_governance() {
    let governance = install_governance::<T>();
    let successor: T::AccountId = account("successor", 0, 0);

    #[extrinsic_call]
    transfer_governance(RawOrigin::Signed(governance), successor.clone());

    assert!(Pallet::<T>::is_governance(successor));
  }

  #[benchmark]
  fn set_withdrawable_factor() {
    // Worst case: caller is not governance, so both role lookups run
    let executor = install_executor::<T>();
    let factor = T::MaxWithdrawableFactor::get();

    #[extrinsic_call]
    set_withdrawable_factor(RawOrigin::Signed(executor), factor);

    assert_eq!(WithdrawableFactor::<T>::get(), factor);
  }

  #[benchmark]
  fn set_weekly_spot_amount() {
    let executor = install_executor::<T>();

    #[extrinsic_call]
    set_weekly_spot_amount(RawOrigin::Signed(executor), 1_000_000);

    assert_eq!(WeeklySpotAmount::<T>::get(), 1_000_000);
  }

  #[benchmark]
  fn pause() {
    let guardian: T::AccountId = account("guardian", 0, 0);
    Guardian::<T>::put(&guardian);

    #[extrinsic_call]
    pause(RawOrigin::Signed(guardian));

    assert!(Paused::<T>::get());
  }

  #[benchmark]
  fn unpause() {
    let governance = install_governance::<T>();
    Paused::<T>::put(true);

    #[extrinsic_call]
    unpause(RawOrigin::Signed(governance));

    assert!(!Paused::<T>::get());
  }

  #[benchmark]
  fn perform_upkeep() {
    let executor = install_executor::<T>();
    WithdrawableFactor::<T>::put(BasisPoints::from_bps(1_000));
    T::BenchmarkHelper::prepare_upkeep(&T::Source::get()).expect("Failed to prepare custody");
    let epoch_id = T::Custody::current_epoch();

    #[extrinsic_call]
    perform_upkeep(RawOrigin::Signed(executor), PerformData::default());

    assert_eq!(LastEpochIdWithdrawn::<T>::get(), epoch_id);
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
