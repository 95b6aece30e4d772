use std::sync::Arc;

use async_trait::async_trait;
use folio_types::{Project, Slug};
use url::Url;

use crate::domain::{
    ports::{inbound::ProjectService, outbound::ProjectRepository},
    ProjectError,
};

pub struct ProjectServiceImpl<R> {
    repository: Arc<R>,
}

impl<R> ProjectServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

/// A thumbnail must point at an uploaded image, never at a local file.
fn check_thumbnail(thumbnail: &str) -> Result<(), ProjectError> {
    match Url::parse(thumbnail) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ProjectError::InvalidThumbnail(thumbnail.to_string())),
    }
}

#[async_trait]
impl<R: ProjectRepository> ProjectService for ProjectServiceImpl<R> {
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, ProjectError> {
        let Ok(slug) = Slug::try_from(slug) else {
            tracing::debug!("lookup with malformed slug '{}'", slug);
            return Ok(None);
        };

        self.repository.find_by_slug(&slug).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError> {
        self.repository.list().await
    }

    async fn update_project(&self, project: Project) -> Result<Project, ProjectError> {
        let fields = project
            .to_input()
            .validate()
            .map_err(ProjectError::Invalid)?;
        check_thumbnail(&project.thumbnail)?;

        let slug = project.slug.clone();
        let normalized = Project::from_fields(project.slug, fields, project.thumbnail);

        let stored = self
            .repository
            .replace(&normalized)
            .await?
            .ok_or_else(|| ProjectError::NotFound(slug.to_string()))?;

        tracing::info!("updated project '{}'", slug);
        Ok(stored)
    }
}
