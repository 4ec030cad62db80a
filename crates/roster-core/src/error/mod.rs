//! Domain errors

use thiserror::Error;

/// Errors raised by domain-level operations.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Import contains no members")]
    EmptyImport,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Error code string for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::EmptyImport => "EMPTY_IMPORT",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Check if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_))
    }

    /// Check if this is a validation-class error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyImport | Self::UnknownRole(_) | Self::Validation(_)
        )
    }
}
