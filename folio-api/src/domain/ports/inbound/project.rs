use async_trait::async_trait;
use folio_types::Project;

use crate::domain::ProjectError;

/// Inbound port for the `project.*` procedures and the public pages.
#[async_trait]
pub trait ProjectService: Send + Sync + 'static {
    /// Looks a project up by slug.
    ///
    /// A slug that matches nothing, malformed ones included, yields `Ok(None)`.
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, ProjectError>;

    /// All projects, most recent first.
    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError>;

    /// Replaces every field of the project identified by `project.slug`.
    ///
    /// The payload is validated before anything is written; the stored
    /// record is returned.
    async fn update_project(&self, project: Project) -> Result<Project, ProjectError>;
}
