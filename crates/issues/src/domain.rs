//! Core domain types for the issue tracker.
//!
//! An [`Issue`] always belongs to exactly one project. Creation input is
//! carried by [`NewIssue`] and partial modifications by [`IssueUpdate`];
//! neither is trusted until the [`CommandExecutor`](crate::CommandExecutor)
//! has validated it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// A single trackable unit of work, scoped to a project.
///
/// Field names match the JSON wire format, except `id` which is exposed as
/// `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: String,
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl Issue {
    /// Build an open issue in `project` from already validated fields.
    ///
    /// `created_on` and `updated_on` are both set to `now`.
    pub fn new(project: &str, fields: ValidatedIssue, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            project: project.to_string(),
            issue_title: fields.issue_title,
            issue_text: fields.issue_text,
            created_by: fields.created_by,
            assigned_to: fields.assigned_to,
            status_text: fields.status_text,
            open: true,
            created_on: now,
            updated_on: now,
        }
    }
}

/// Generate a new issue identifier.
///
/// ULIDs start with a millisecond timestamp and carry 80 random bits, so two
/// ids minted in the same millisecond still differ.
pub fn generate_id() -> String {
    Ulid::new().to_string()
}

/// Creation request as received from a client.
///
/// Every field is optional at this stage; [`NewIssue::validate`] enforces
/// the required ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewIssue {
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub issue_text: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status_text: Option<String>,
}

/// Creation fields after the presence checks passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedIssue {
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
}

impl NewIssue {
    /// Check that `issue_title`, `issue_text` and `created_by` are present and
    /// non-empty. Optional fields default to the empty string.
    ///
    /// Returns `None` when a required field is missing.
    pub fn validate(self) -> Option<ValidatedIssue> {
        Some(ValidatedIssue {
            issue_title: non_empty(self.issue_title)?,
            issue_text: non_empty(self.issue_text)?,
            created_by: non_empty(self.created_by)?,
            assigned_to: self.assigned_to.unwrap_or_default(),
            status_text: self.status_text.unwrap_or_default(),
        })
    }
}

/// Partial modification of an issue.
///
/// `None` leaves the field untouched. An empty string counts as "not
/// supplied" once [`IssueUpdate::without_blanks`] has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssueUpdate {
    /// Drop every text field whose value is the empty string.
    pub fn without_blanks(self) -> Self {
        Self {
            issue_title: non_empty(self.issue_title),
            issue_text: non_empty(self.issue_text),
            created_by: non_empty(self.created_by),
            assigned_to: non_empty(self.assigned_to),
            status_text: non_empty(self.status_text),
            open: self.open,
        }
    }

    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.issue_title.is_none()
            && self.issue_text.is_none()
            && self.created_by.is_none()
            && self.assigned_to.is_none()
            && self.status_text.is_none()
            && self.open.is_none()
    }

    /// Overwrite the supplied fields on `issue` and refresh `updated_on`.
    pub fn apply(self, issue: &mut Issue, now: DateTime<Utc>) {
        if let Some(title) = self.issue_title {
            issue.issue_title = title;
        }
        if let Some(text) = self.issue_text {
            issue.issue_text = text;
        }
        if let Some(created_by) = self.created_by {
            issue.created_by = created_by;
        }
        if let Some(assigned_to) = self.assigned_to {
            issue.assigned_to = assigned_to;
        }
        if let Some(status_text) = self.status_text {
            issue.status_text = status_text;
        }
        if let Some(open) = self.open {
            issue.open = open;
        }
        // Never move backwards, even if the wall clock did.
        issue.updated_on = now.max(issue.created_on);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
