//! In-memory project repository for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use folio_types::{Project, Slug};

use crate::domain::{ports::outbound::ProjectRepository, ProjectError};

#[derive(Clone, Default)]
pub struct MockProjectRepository {
    projects: Arc<RwLock<HashMap<Slug, Project>>>,
    find_calls: Arc<AtomicUsize>,
    replace_calls: Arc<AtomicUsize>,
    failing: bool,
}

impl MockProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        {
            let mut stored = self.projects.write().unwrap();
            for project in projects {
                stored.insert(project.slug.clone(), project);
            }
        }
        self
    }

    /// Every call fails with a storage error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn get(&self, slug: &str) -> Option<Project> {
        let slug = Slug::try_from(slug).ok()?;
        self.projects.read().unwrap().get(&slug).cloned()
    }

    pub fn find_count(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn replace_count(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ProjectError> {
        if self.failing {
            return Err(ProjectError::storage("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for MockProjectRepository {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Project>, ProjectError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.projects.read().unwrap().get(slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Project>, ProjectError> {
        self.check()?;
        let mut projects: Vec<_> = self.projects.read().unwrap().values().cloned().collect();
        projects.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        Ok(projects)
    }

    async fn replace(&self, project: &Project) -> Result<Option<Project>, ProjectError> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut projects = self.projects.write().unwrap();
        match projects.get_mut(&project.slug) {
            Some(stored) => {
                *stored = project.clone();
                Ok(Some(project.clone()))
            }
            None => Ok(None),
        }
    }
}
