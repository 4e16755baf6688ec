//! Shared helpers used across layers.

pub mod clock;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use validate::ValidatedJson;
