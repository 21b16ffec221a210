//! SQLite backend for the Carnet contact store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every operation waits a bounded amount
//! of time before giving up with [`carnet_core::Error::Unavailable`].

mod encode;
mod schema;
mod store;

pub use store::SqliteStore;
