//! Equality filters for listing issues.
//!
//! Query parameters arrive as untyped `key=value` pairs. Each key is resolved
//! to an [`IssueField`] and compared with the field's own type: strings
//! exactly, `open` as a boolean, timestamps as instants. A key that names no
//! field can never match, so it empties the result.

use crate::domain::Issue;
use chrono::{DateTime, Utc};

/// Issue fields that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueField {
    Id,
    Project,
    IssueTitle,
    IssueText,
    CreatedBy,
    AssignedTo,
    StatusText,
    Open,
    CreatedOn,
    UpdatedOn,
}

impl IssueField {
    /// Resolve a wire field name.
    pub fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            "_id" => IssueField::Id,
            "project" => IssueField::Project,
            "issue_title" => IssueField::IssueTitle,
            "issue_text" => IssueField::IssueText,
            "created_by" => IssueField::CreatedBy,
            "assigned_to" => IssueField::AssignedTo,
            "status_text" => IssueField::StatusText,
            "open" => IssueField::Open,
            "created_on" => IssueField::CreatedOn,
            "updated_on" => IssueField::UpdatedOn,
            _ => return None,
        };
        Some(field)
    }

    fn matches(self, issue: &Issue, expected: &str) -> bool {
        match self {
            IssueField::Id => issue.id == expected,
            IssueField::Project => issue.project == expected,
            IssueField::IssueTitle => issue.issue_title == expected,
            IssueField::IssueText => issue.issue_text == expected,
            IssueField::CreatedBy => issue.created_by == expected,
            IssueField::AssignedTo => issue.assigned_to == expected,
            IssueField::StatusText => issue.status_text == expected,
            IssueField::Open => parse_bool(expected) == Some(issue.open),
            IssueField::CreatedOn => parse_timestamp(expected) == Some(issue.created_on),
            IssueField::UpdatedOn => parse_timestamp(expected) == Some(issue.updated_on),
        }
    }
}

/// A conjunction of equality predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    predicates: Vec<(IssueField, String)>,
    unknown_key: bool,
}

impl IssueFilter {
    /// Filter that accepts every issue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from query string pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |filter, (key, value)| filter.with(key.as_ref(), value))
    }

    /// Add one `key == value` predicate.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        match IssueField::from_key(key) {
            Some(field) => self.predicates.push((field, value.into())),
            None => self.unknown_key = true,
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty() && !self.unknown_key
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        !self.unknown_key
            && self
                .predicates
                .iter()
                .all(|(field, expected)| field.matches(issue, expected))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
