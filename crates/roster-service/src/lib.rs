//! # roster-service
//!
//! Application layer containing roster use cases, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ImportService, RaiderIoClient, RaiderIoService, RosterService, ServiceContext, ServiceError,
    ServiceResult,
};
