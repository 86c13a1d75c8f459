//! In-memory storage implementation.
//!
//! Issues are kept in a map from project name to a vector, so each project
//! preserves insertion order and lookups are a linear scan of one project.

use crate::domain::Issue;
use crate::storage::IssueStore;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Projects = HashMap<String, Vec<Issue>>;

/// In-memory storage backend.
///
/// All data is lost when the last clone is dropped. Uses `Arc<RwLock<>>`
/// for shared interior mutability - clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    projects: Arc<RwLock<Projects>>,
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage instance.
    pub fn new() -> Self {
        Self::default()
    }

    // Every write either completes or never starts, so a panic elsewhere
    // cannot leave the map half-modified and the poisoned guard is usable.
    fn read(&self) -> RwLockReadGuard<'_, Projects> {
        self.projects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Projects> {
        self.projects.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IssueStore for InMemoryStorage {
    fn insert(&self, issue: Issue) {
        self.write()
            .entry(issue.project.clone())
            .or_default()
            .push(issue);
    }

    fn list_matching<P>(&self, project: &str, predicate: P) -> Vec<Issue>
    where
        P: Fn(&Issue) -> bool,
    {
        self.read()
            .get(project)
            .map(|issues| {
                issues
                    .iter()
                    .filter(|issue| predicate(issue))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn modify<F>(&self, project: &str, id: &str, change: F) -> Option<Issue>
    where
        F: FnOnce(&mut Issue),
    {
        let mut projects = self.write();
        let issue = projects
            .get_mut(project)?
            .iter_mut()
            .find(|issue| issue.id == id)?;
        change(issue);
        Some(issue.clone())
    }

    fn remove(&self, project: &str, id: &str) -> Option<Issue> {
        let mut projects = self.write();
        let issues = projects.get_mut(project)?;
        let index = issues.iter().position(|issue| issue.id == id)?;
        let removed = issues.remove(index);
        if issues.is_empty() {
            projects.remove(project);
        }
        Some(removed)
    }
}
