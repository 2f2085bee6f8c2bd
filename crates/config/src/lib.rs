//! Configuration for column-sync: which elements act as controls and tables,
//! which attributes carry the group key and visibility flag, and which signal
//! a control fires when the user toggles it.
#![warn(missing_docs)]

mod defaults;
mod error;
mod loader;
mod sync;

pub use error::Error;
pub use loader::{from_ron_str, load_from_path};
pub use sync::SyncConfig;
