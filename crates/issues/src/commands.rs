//! Command execution logic for issue operations.
//!
//! The `CommandExecutor` owns a storage backend and implements the four
//! project-scoped operations: list, create, update and delete. Validation
//! happens here, before the store is touched, so a failed command never
//! mutates anything.

use crate::domain::{Issue, IssueUpdate, NewIssue};
use crate::errors::IssueError;
use crate::filter::IssueFilter;
use crate::storage::IssueStore;
use chrono::Utc;

pub struct CommandExecutor<S> {
    storage: S,
}

impl<S: IssueStore> CommandExecutor<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Issues of `project` accepted by `filter`, in creation order.
    pub fn list_issues(&self, project: &str, filter: &IssueFilter) -> Vec<Issue> {
        self.storage
            .list_matching(project, |issue| filter.matches(issue))
    }

    /// Create an open issue in `project` and return it.
    pub fn create_issue(&self, project: &str, new_issue: NewIssue) -> Result<Issue, IssueError> {
        let fields = new_issue
            .validate()
            .ok_or(IssueError::RequiredFieldsMissing)?;

        let issue = Issue::new(project, fields, Utc::now());
        self.storage.insert(issue.clone());
        Ok(issue)
    }

    /// Apply the non-empty fields of `update` to the issue `id` in `project`.
    ///
    /// Returns the id of the updated issue.
    pub fn update_issue(
        &self,
        project: &str,
        id: Option<&str>,
        update: IssueUpdate,
    ) -> Result<String, IssueError> {
        let id = require_id(id)?;

        let update = update.without_blanks();
        if update.is_empty() {
            return Err(IssueError::NoUpdateFields { id: id.to_string() });
        }

        self.storage
            .modify(project, id, |issue| update.apply(issue, Utc::now()))
            .map(|issue| issue.id)
            .ok_or_else(|| IssueError::CouldNotUpdate { id: id.to_string() })
    }

    /// Remove the issue `id` from `project`. Returns the removed issue's id.
    pub fn delete_issue(&self, project: &str, id: Option<&str>) -> Result<String, IssueError> {
        let id = require_id(id)?;

        self.storage
            .remove(project, id)
            .map(|issue| issue.id)
            .ok_or_else(|| IssueError::CouldNotDelete { id: id.to_string() })
    }
}

fn require_id(id: Option<&str>) -> Result<&str, IssueError> {
    id.filter(|id| !id.is_empty()).ok_or(IssueError::MissingId)
}
