#![cfg_attr(not(feature = "std"), no_std)]

pub mod basis_points;
pub mod ecosystem;

pub use basis_points::*;
pub use ecosystem::*;
