mod error;
mod persist;
mod state;
mod store;

pub use error::StateError;
pub use persist::{FlagFile, PersistedFlags};
pub use state::MessageState;
pub use store::MessageStateStore;
