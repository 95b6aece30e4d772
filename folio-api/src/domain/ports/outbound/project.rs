use async_trait::async_trait;
use folio_types::{Project, Slug};

use crate::domain::ProjectError;

#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Project>, ProjectError>;

    async fn list(&self) -> Result<Vec<Project>, ProjectError>;

    /// Overwrites the stored record with the same slug.
    ///
    /// Returns `None` when no record has that slug; nothing is inserted.
    async fn replace(&self, project: &Project) -> Result<Option<Project>, ProjectError>;
}
