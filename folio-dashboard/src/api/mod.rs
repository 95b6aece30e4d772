//! Typed access to the `project.*` procedures of the API server.

use async_trait::async_trait;
use folio_types::Project;

mod client;
mod error;

pub use client::RpcProjectClient;
pub use error::{MutationError, QueryError};

#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// `None` when no project has this slug.
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, QueryError>;

    /// Newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, QueryError>;

    /// Replaces the stored record with the same slug and returns what was stored.
    async fn update_project(&self, project: &Project) -> Result<Project, MutationError>;
}
