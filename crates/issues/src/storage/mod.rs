//! Storage abstraction for project-scoped issues.
//!
//! The `IssueStore` trait decouples the command layer from the container
//! that holds issues. Only an in-memory backend exists; issues live as long
//! as the process does.

use crate::domain::Issue;

pub mod memory;

pub use memory::InMemoryStorage;

/// Trait for storage backends holding issues partitioned by project.
///
/// Implementations must be `Clone` (clones share the same data) and safe to
/// share across request handlers. Each method runs atomically: a lookup and
/// the mutation that follows it happen under one lock.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use issues::domain::{Issue, NewIssue};
/// use issues::storage::{InMemoryStorage, IssueStore};
///
/// let storage = InMemoryStorage::new();
/// let fields = NewIssue {
///     issue_title: Some("Fix bug".to_string()),
///     issue_text: Some("Details".to_string()),
///     created_by: Some("Tester".to_string()),
///     ..Default::default()
/// }
/// .validate()
/// .unwrap();
///
/// let issue = Issue::new("apitest", fields, Utc::now());
/// storage.insert(issue.clone());
///
/// assert_eq!(storage.list("apitest"), vec![issue]);
/// assert!(storage.list("other").is_empty());
/// ```
pub trait IssueStore: Clone + Send + Sync {
    /// Append an issue to its project.
    fn insert(&self, issue: Issue);

    /// All issues of `project` matching `predicate`, in insertion order.
    ///
    /// An unknown project yields an empty vector.
    fn list_matching<P>(&self, project: &str, predicate: P) -> Vec<Issue>
    where
        P: Fn(&Issue) -> bool;

    /// All issues of `project`, in insertion order.
    fn list(&self, project: &str) -> Vec<Issue> {
        self.list_matching(project, |_| true)
    }

    /// Find an issue by project and id and mutate it in place.
    ///
    /// Returns the updated issue, or `None` if it does not exist.
    fn modify<F>(&self, project: &str, id: &str, change: F) -> Option<Issue>
    where
        F: FnOnce(&mut Issue);

    /// Remove an issue by project and id, returning it if it existed.
    fn remove(&self, project: &str, id: &str) -> Option<Issue>;
}
