//! # Forge API Ops
//!
//! Typed GitHub REST orchestration for the Repoship uploader.
//!
//! Forge API Ops owns request construction, pagination, response parsing,
//! and error normalization for the repository-management endpoints the
//! presentation layer and the upload workflow depend on.

mod client;
mod error;
mod types;

pub use client::{ForgeApiClient, DEFAULT_BASE_URL, FALLBACK_DEFAULT_BRANCH};
pub use error::ForgeApiError;
pub use types::{CreateRepositoryInput, RepoName, RepositorySummary};
