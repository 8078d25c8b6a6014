pub mod expiry;
mod model;

pub use expiry::{compute_expiry, kst_now, ExpiryError, ExpiryStatus};
pub use model::*;
