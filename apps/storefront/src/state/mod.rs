//! # Application State
//!
//! The store, its snapshot type and the per-page mount tokens.

mod mount;
mod remote;
mod store;

pub use mount::{Mount, MountWatch};
pub use remote::Remote;
pub use store::{reduce, AppAction, AppState, Store};
