//! # roster-core
//!
//! Domain layer for the guild roster service: entities, value objects, the
//! addon-export parser, the reconciliation engine, the filter/sort engine,
//! and the roster view-state aggregate. This crate has zero dependencies on
//! infrastructure (filesystem, web framework, etc.).

pub mod entities;
pub mod error;
pub mod export;
pub mod query;
pub mod reconcile;
pub mod value_objects;
pub mod view;

// Re-export commonly used types at crate root
pub use entities::{RosterData, RosterMember};
pub use error::DomainError;
pub use export::{parse_auto_export, ExportParseError};
pub use query::{
    apply_filters, sort_members, FilterOperator, MemberField, RosterFilter, SortDirection,
};
pub use reconcile::{reconcile, MergeChange, MergeOutcome};
pub use value_objects::{role_for_spec, specs_for_class, Role};
pub use view::{ColumnConfig, MergePreview, RosterViewState};
