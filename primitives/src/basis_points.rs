use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_arithmetic::{PerThing, Permill};

const PPM_PER_BPS: u32 = 100;

/// A fraction expressed in basis points (1 bps = 0.01%).
///
/// The value is not clamped to `BPS_DENOMINATOR`; bounds are a policy concern and are
/// enforced by whoever stores the fraction.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct BasisPoints(u32);

impl BasisPoints {
  /// Fraction of `bps` basis points
  pub const fn from_bps(bps: u32) -> Self {
    Self(bps)
  }

  /// Raw basis-point value
  pub const fn bps(&self) -> u32 {
    self.0
  }

  /// 0%
  pub const fn zero() -> Self {
    Self(0)
  }

  /// Whether the fraction is 0%
  pub const fn is_zero(&self) -> bool {
    self.0 == 0
  }

  /// Same fraction in parts per million, saturating at 100%.
  pub fn as_permill(&self) -> Permill {
    Permill::from_parts(self.0.saturating_mul(PPM_PER_BPS))
  }

  /// `amount * bps / 10_000`, rounded down. Fractions above 100% yield `amount`.
  pub fn mul_floor(&self, amount: u128) -> u128 {
    self.as_permill().mul_floor(amount)
  }
}
