#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn add_executor() -> Weight;
	fn remove_executor() -> Weight;
	fn set_guardian() -> Weight;
	fn transfer_governance() -> Weight;
	fn set_withdrawable_factor() -> Weight;
	fn set_weekly_spot_amount() -> Weight;
	fn pause() -> Weight;
	fn unpause() -> Weight;
	fn perform_upkeep() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn add_executor() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn remove_executor() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn set_guardian() -> Weight {
		Weight::from_parts(10_000_000, 1000)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn transfer_governance() -> Weight {
		Weight::from_parts(10_000_000, 1000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_withdrawable_factor() -> Weight {
		Weight::from_parts(12_000_000, 1200)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_weekly_spot_amount() -> Weight {
		Weight::from_parts(12_000_000, 1200)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn pause() -> Weight {
		Weight::from_parts(12_000_000, 1200)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn unpause() -> Weight {
		Weight::from_parts(10_000_000, 1000)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn perform_upkeep() -> Weight {
		Weight::from_parts(60_000_000, 4000)
			.saturating_add(T::DbWeight::get().reads(8))
			.saturating_add(T::DbWeight::get().writes(4))
	}
}

impl WeightInfo for () {
	fn add_executor() -> Weight {
		Weight::from_parts(15_000_000, 1500)
	}
	fn remove_executor() -> Weight {
		Weight::from_parts(15_000_000, 1500)
	}
	fn set_guardian() -> Weight {
		Weight::from_parts(10_000_000, 1000)
	}
	fn transfer_governance() -> Weight {
		Weight::from_parts(10_000_000, 1000)
	}
	fn set_withdrawable_factor() -> Weight {
		Weight::from_parts(12_000_000, 1200)
	}
	fn set_weekly_spot_amount() -> Weight {
		Weight::from_parts(12_000_000, 1200)
	}
	fn pause() -> Weight {
		Weight::from_parts(12_000_000, 1200)
	}
	fn unpause() -> Weight {
		Weight::from_parts(10_000_000, 1000)
	}
	fn perform_upkeep() -> Weight {
		Weight::from_parts(60_000_000, 4000)
	}
}
