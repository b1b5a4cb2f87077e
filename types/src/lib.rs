//! Fundamental types for Crispy governance.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, hashes, amounts and fixed-point math, timestamps and clocks,
//! and the governor's immutable economic parameters.

pub mod address;
pub mod amount;
pub mod hash;
pub mod params;
pub mod time;

pub use address::{Address, AddressParseError};
pub use amount::{frac_mul, units, SCALE, TOKEN_UNIT};
pub use hash::Hash256;
pub use params::{GovernorParams, TaxSplit};
pub use time::{Clock, SystemClock, Timestamp};
