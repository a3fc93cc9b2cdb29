//! # hyphae-db-lmdb
//!
//! Durable blob store backend on LMDB, via the heed crate.
//!
//! Records survive process restarts and are written under ACID transactions.
//! One LMDB environment holds a single unnamed database mapping CID strings
//! to framed blob records.
//!
//! Construct a store once at startup, either directly with
//! [`LmdbBlobStore::open`] or through [`factory::open_store`], and share it
//! as a [`hyphae_storage::DynBlobStore`] handle.

pub mod factory;
mod store;

pub use factory::{BackendKind, StoreConfig, open_store};
pub use store::{LmdbBlobStore, LmdbStoreOptions};
