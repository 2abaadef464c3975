//! Supporting utilities shared across modules.

pub mod constraint;
pub mod units;
