//! Error types shared by the domain layer.

use std::fmt;
use thiserror::Error;

/// Rejected input: a required field was blank, a value failed to parse, or
/// a field was given for an item type that has no use for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' does not apply: {reason}")]
    NotApplicable { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_applicable(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::NotApplicable {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotApplicable { field, .. } => field,
        }
    }
}

/// Machine-readable codes carried in API error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    InvalidStateTransition,
    ItemNotFound,
    Unauthorized,
    Conflict,
    SubmissionInProgress,
    ReleaseGated,
    ApprovalNotEditable,
    RevisionNotAllowed,
    AlreadyArchived,
    BackendError,
    CacheUnavailable,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::ItemNotFound => "ITEM_NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::SubmissionInProgress => "SUBMISSION_IN_PROGRESS",
            ErrorCode::ReleaseGated => "RELEASE_GATED",
            ErrorCode::ApprovalNotEditable => "APPROVAL_NOT_EDITABLE",
            ErrorCode::RevisionNotAllowed => "REVISION_NOT_ALLOWED",
            ErrorCode::AlreadyArchived => "ALREADY_ARCHIVED",
            ErrorCode::BackendError => "BACKEND_ERROR",
            ErrorCode::CacheUnavailable => "CACHE_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coded domain failure, optionally pinned to the form field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub field: Option<String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::new(ErrorCode::ValidationFailed, err.to_string()).on_field(field)
    }
}
