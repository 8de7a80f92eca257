//! Ecosystem Constants for the Divest Module
//!
//! This module centralizes the policy defaults and fundamental units used by the divest
//! module and by any runtime that wires it in.
//!
//! These constants are the single source of truth for the module's economic parameters and
//! are re-used by runtime configurations and the pallet mock via the primitives crate.

use crate::BasisPoints;

/// Balance type alias for consistency across ecosystem
pub type Balance = u128;

/// Custody epoch identifier. `0` means "never withdrawn".
pub type EpochId = u64;

/// Ecosystem parameters defining mathematical constants and thresholds.
pub mod params {
  use super::{Balance, BasisPoints};

  /// Precision scalar for token amounts (10^12).
  pub const PRECISION: Balance = 1_000_000_000_000;

  /// Denominator of every basis-point fraction (100%).
  pub const BPS_DENOMINATOR: u32 = 10_000;

  /// Upper bound for the withdrawable factor (60%).
  ///
  /// Caps how much of the position a single cycle may ever target, whatever the
  /// executors configure.
  pub const DIVEST_MAX_WITHDRAWABLE_FACTOR: BasisPoints = BasisPoints::from_bps(6_000);

  /// Default withdrawable factor (10%).
  pub const DIVEST_DEFAULT_WITHDRAWABLE_FACTOR: BasisPoints = BasisPoints::from_bps(1_000);

  /// Default per-cycle cap on withdrawn position units (3,000 tokens).
  pub const DIVEST_DEFAULT_WEEKLY_SPOT_AMOUNT: Balance = 3_000 * PRECISION;

  /// Length of one custody epoch in seconds (one week).
  pub const EPOCH_DURATION_SECS: u64 = 604_800;

  /// Upper bound on the executor set (keepers + operators).
  pub const DIVEST_MAX_EXECUTORS: u32 = 16;

  /// Upper bound on the opaque keeper payload, in bytes.
  pub const DIVEST_MAX_PERFORM_DATA_LEN: u32 = 256;
}
