//! Fee model for pooled ticket purchases.
//!
//! Every participant pays the same integer fee; the total charged is that fee
//! times the participant count and is never below the nominal estimate.

pub mod model;
pub mod params;

pub use model::{FeeModel, SessionFees};
pub use params::FeeParams;
