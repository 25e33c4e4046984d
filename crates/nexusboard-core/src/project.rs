//! Project grouping and sharing.

use serde::{Deserialize, Serialize};

use crate::ProjectId;

/// A project owns a set of tasks and can be shared with other members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,

    /// Display name.
    pub name: String,

    /// Username of the owner.
    pub owner: String,

    /// Usernames the project is shared with (never includes the owner).
    #[serde(default)]
    pub shared_with: Vec<String>,
}

impl Project {
    /// Create a new project.
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: ProjectId::generate(),
            name: name.into(),
            owner: owner.into(),
            shared_with: Vec::new(),
        }
    }

    /// Builder method to set a specific ID (useful for testing).
    pub fn with_id(mut self, id: ProjectId) -> Self {
        self.id = id;
        self
    }

    /// Whether a username can see this project.
    pub fn is_member(&self, username: &str) -> bool {
        self.owner == username || self.shared_with.iter().any(|u| u == username)
    }

    /// Share with a username. The owner and already-present names are
    /// ignored.
    pub fn share_with(&mut self, username: impl Into<String>) {
        let username = username.into();
        if username != self.owner && !self.shared_with.contains(&username) {
            self.shared_with.push(username);
        }
    }

    /// Remove a username from the share list.
    pub fn unshare(&mut self, username: &str) {
        self.shared_with.retain(|u| u != username);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_dedupes_and_skips_owner() {
        let mut project = Project::new("Platform", "ana");
        project.share_with("bruno");
        project.share_with("bruno");
        project.share_with("ana");
        assert_eq!(project.shared_with, vec!["bruno"]);
    }

    #[test]
    fn test_membership() {
        let mut project = Project::new("Platform", "ana");
        project.share_with("bruno");
        assert!(project.is_member("ana"));
        assert!(project.is_member("bruno"));
        assert!(!project.is_member("carla"));

        project.unshare("bruno");
        assert!(!project.is_member("bruno"));
    }
}
