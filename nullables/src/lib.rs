//! Test doubles for the few things Crispy reads from the outside world.
//!
//! Today that is only time: [`NullClock`] implements
//! [`Clock`](crispy_types::Clock) and is moved by hand.

pub mod clock;

pub use clock::NullClock;
