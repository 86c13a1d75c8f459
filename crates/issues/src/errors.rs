//! Errors returned by issue operations.
//!
//! Every failure is a logical one: the request was understood but could not
//! be carried out. Callers decide how to surface it; the HTTP layer reports
//! it in the response payload.

use thiserror::Error;

/// Broad category of an [`IssueError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request is missing a required or identifying field.
    Validation,
    /// The addressed issue does not exist in the project.
    NotFound,
}

/// Errors that can occur while creating, updating or deleting issues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueError {
    #[error("required field(s) missing")]
    RequiredFieldsMissing,

    #[error("missing _id")]
    MissingId,

    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },

    #[error("could not update")]
    CouldNotUpdate { id: String },

    #[error("could not delete")]
    CouldNotDelete { id: String },
}

impl IssueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IssueError::RequiredFieldsMissing
            | IssueError::MissingId
            | IssueError::NoUpdateFields { .. } => ErrorKind::Validation,
            IssueError::CouldNotUpdate { .. } | IssueError::CouldNotDelete { .. } => {
                ErrorKind::NotFound
            }
        }
    }

    /// The issue id the error refers to, when the client supplied one.
    pub fn id(&self) -> Option<&str> {
        match self {
            IssueError::RequiredFieldsMissing | IssueError::MissingId => None,
            IssueError::NoUpdateFields { id }
            | IssueError::CouldNotUpdate { id }
            | IssueError::CouldNotDelete { id } => Some(id),
        }
    }
}
