//! # roster-store
//!
//! Persistence layer for roster data.
//!
//! ## Overview
//!
//! This crate stores the roster aggregate as a JSON document and keeps
//! timestamped historical snapshots of superseded rosters. It handles:
//!
//! - Atomic roster file writes (temp file + rename)
//! - Legacy bare-array roster files, normalized on read
//! - Write-once historical snapshots named after the superseded timestamp
//! - An embedded in-memory backend for tests and demo data
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_store::RosterStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RosterStore::file_backed("data/roster.json", "data/rosters");
//!     let roster = store.load().await?;
//!     // ...
//!     store.save(&roster).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod normalize;
pub mod store;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use normalize::{normalize_roster_json, RawRoster};
pub use store::{read_export, snapshot_name, RosterStore};
