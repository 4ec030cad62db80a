//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! validation and orchestration of roster operations.

pub mod context;
pub mod error;
pub mod import;
pub mod raider_io;
pub mod roster;

// Re-export all services for convenience
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use import::ImportService;
pub use raider_io::{RaiderIoClient, RaiderIoService};
pub use roster::RosterService;
