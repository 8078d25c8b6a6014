mod backend;
mod envelope;
mod error;

pub use backend::{HeartApi, HttpHeartApi};
pub use envelope::{Envelope, SUCCESS_STATUS};
pub use error::ApiError;
