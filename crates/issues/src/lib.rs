//! Project-scoped issue tracking library.
//!
//! Holds issues in memory, partitioned by project, and implements the
//! list/create/update/delete operations served by the HTTP API. The crate
//! has no transport dependencies and can be embedded directly.

pub mod commands;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod storage;

// Re-export commonly used types
pub use commands::CommandExecutor;
pub use domain::{Issue, IssueUpdate, NewIssue};
pub use errors::{ErrorKind, IssueError};
pub use filter::IssueFilter;
pub use storage::{InMemoryStorage, IssueStore};
