//! Flat-file persistence for the carnet vehicle logbook.
//!
//! This crate owns the on-disk layout of a logbook: two CSV tables
//! (maintenance events, fuel fill-ups), a JSON vehicle registry, and two
//! attachment directories (receipts, vehicle photos). Saves are whole-file
//! overwrites; there is no locking and no support for concurrent writers.
//!
//! A missing table or registry file loads as an empty dataset. A file that
//! exists but cannot be parsed is a real error; callers decide how to
//! surface it.
//!
//! # Example
//!
//! ```no_run
//! use carnet_store::Store;
//!
//! let store = Store::open_default()?;
//! let maintenance = store.load_maintenance()?;
//! println!("{} maintenance rows", maintenance.len());
//! # Ok::<(), carnet_store::Error>(())
//! ```

mod attachments;
mod error;
mod store;

pub use error::{Error, Result};
pub use store::{Registry, RemovedRecords, Store, adopt_orphans};

/// Default data directory following platform conventions.
///
/// - Linux: `~/.local/share/carnet/`
/// - macOS: `~/Library/Application Support/carnet/`
/// - Windows: `C:\Users\<user>\AppData\Local\carnet\`
pub fn default_data_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("carnet")
}
