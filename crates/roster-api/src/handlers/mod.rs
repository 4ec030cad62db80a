//! Request handlers, organized by domain

pub mod health;
pub mod import;
pub mod raiderio;
pub mod roster;
