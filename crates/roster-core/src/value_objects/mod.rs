//! Value objects

mod role;
mod specs;

pub use role::Role;
pub use specs::{role_for_spec, specs_for_class, SpecInfo};
