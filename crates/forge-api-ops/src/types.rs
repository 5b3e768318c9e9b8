use crate::ForgeApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Read-only snapshot of a hosted repository.
///
/// Produced by list/create/get calls; callers refresh by re-listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
    pub is_private: bool,
    pub default_branch: String,
    pub clone_url: String,
}

/// Input for creating a repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRepositoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub auto_init: bool,
}

/// Validated `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName {
    owner: String,
    name: String,
}

impl RepoName {
    /// Parse an `owner/name` pair. Both segments must be non-empty and the
    /// name segment must not itself contain a slash.
    pub fn parse(raw: &str) -> Result<Self, ForgeApiError> {
        let invalid = || ForgeApiError::Validation {
            message: format!("invalid repository identifier `{raw}`, expected owner/name"),
        };

        let (owner, name) = raw.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoName {
    type Err = ForgeApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}
