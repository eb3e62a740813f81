//! Requirement change entities

use crate::core::error::DomainError;
use crate::core::time::current_timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of modification a change proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Add,
    Modify,
    Remove,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Add => "ADD",
            ChangeType::Modify => "MODIFY",
            ChangeType::Remove => "REMOVE",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChangeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(ChangeType::Add),
            "modify" | "update" => Ok(ChangeType::Modify),
            "remove" | "delete" => Ok(ChangeType::Remove),
            other => Err(DomainError::UnknownChangeType(other.to_string())),
        }
    }
}

/// A proposed modification to the requirements (Entity)
///
/// Immutable once created: fields are private and only exposed through
/// getters, so nothing downstream can rewrite what the caller submitted.
///
/// # Example
///
/// ```
/// use edrr_domain::change::{ChangeType, RequirementChange};
///
/// let change = RequirementChange::new(ChangeType::Add, "Support SSO login").unwrap();
/// assert_eq!(change.change_type(), ChangeType::Add);
/// assert!(!change.id().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementChange {
    id: String,
    change_type: ChangeType,
    description: String,
    created_by: String,
    created_at: u64,
}

impl RequirementChange {
    /// Create a change with a freshly generated id
    pub fn new(
        change_type: ChangeType,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::with_id(Uuid::new_v4().to_string(), change_type, description)
    }

    /// Create a change with a caller-supplied id
    pub fn with_id(
        id: impl Into<String>,
        change_type: ChangeType,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let description = description.into();

        if id.trim().is_empty() {
            return Err(DomainError::InvalidChange("id is empty".to_string()));
        }
        if description.trim().is_empty() {
            return Err(DomainError::InvalidChange(
                "description is empty".to_string(),
            ));
        }

        Ok(Self {
            id,
            change_type,
            description,
            created_by: "system".to_string(),
            created_at: current_timestamp(),
        })
    }

    /// Record who proposed the change
    pub fn created_by(mut self, author: impl Into<String>) -> Self {
        self.created_by = author.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn author(&self) -> &str {
        &self.created_by
    }

    /// Creation time in milliseconds since epoch
    pub fn created_at(&self) -> u64 {
        self.created_at
    }
}

impl std::fmt::Display for RequirementChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.change_type, self.description)
    }
}
