//! In-memory stand-ins for the API server and the image host.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use cloudinary::{ImageFile, UploadError, UploadedImage};
use folio_types::Project;
use tokio::sync::Notify;

use crate::{
    api::{MutationError, ProjectApi, QueryError},
    upload::ImageUploader,
};

/// Order in which mocks sharing the log were called.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    fn record(&self, call: &'static str) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

/// Holds a call open until the test releases it.
#[derive(Default)]
struct Gate {
    started: Notify,
    release: Notify,
}

impl Gate {
    async fn pass(gate: &Option<Gate>) {
        if let Some(gate) = gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
    }

    async fn wait_until_started(gate: &Option<Gate>) {
        if let Some(gate) = gate {
            gate.started.notified().await;
        }
    }

    fn release(gate: &Option<Gate>) {
        if let Some(gate) = gate {
            gate.release.notify_one();
        }
    }
}

#[derive(Default)]
pub struct MockProjectApi {
    projects: RwLock<HashMap<String, Project>>,
    updates: Mutex<Vec<Project>>,
    fail_updates: bool,
    gate: Option<Gate>,
    log: CallLog,
}

impl MockProjectApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        {
            let mut stored = self.projects.write().unwrap();
            for project in projects {
                stored.insert(project.slug.to_string(), project);
            }
        }
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Every update fails as if the connection dropped.
    pub fn failing_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    /// Updates block until [`MockProjectApi::release`] is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Gate::default());
        self
    }

    pub async fn wait_until_started(&self) {
        Gate::wait_until_started(&self.gate).await;
    }

    pub fn release(&self) {
        Gate::release(&self.gate);
    }

    /// Payloads of all update calls, in order.
    pub fn updates(&self) -> Vec<Project> {
        self.updates.lock().unwrap().clone()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl ProjectApi for MockProjectApi {
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, QueryError> {
        Ok(self.projects.read().unwrap().get(slug).cloned())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, QueryError> {
        let mut projects: Vec<_> = self.projects.read().unwrap().values().cloned().collect();
        projects.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        Ok(projects)
    }

    async fn update_project(&self, project: &Project) -> Result<Project, MutationError> {
        self.log.record("update");
        self.updates.lock().unwrap().push(project.clone());
        Gate::pass(&self.gate).await;

        if self.fail_updates {
            return Err(MutationError::Transport("connection reset".to_string()));
        }

        let mut projects = self.projects.write().unwrap();
        match projects.get_mut(project.slug.as_str()) {
            Some(stored) => {
                *stored = project.clone();
                Ok(project.clone())
            }
            None => Err(MutationError::NotFound(project.slug.to_string())),
        }
    }
}

pub struct MockUploader {
    result: Result<UploadedImage, UploadError>,
    uploaded: Mutex<Vec<ImageFile>>,
    upload_calls: AtomicUsize,
    gate: Option<Gate>,
    log: CallLog,
}

impl MockUploader {
    fn with_result(result: Result<UploadedImage, UploadError>) -> Self {
        Self {
            result,
            uploaded: Mutex::new(Vec::new()),
            upload_calls: AtomicUsize::new(0),
            gate: None,
            log: CallLog::default(),
        }
    }

    pub fn succeeding(secure_url: &str) -> Self {
        Self::with_result(Ok(UploadedImage {
            secure_url: secure_url.to_string(),
            public_id: None,
            width: None,
            height: None,
            format: None,
            size_bytes: None,
        }))
    }

    pub fn failing() -> Self {
        Self::with_result(Err(UploadError::Rejected {
            status: 400,
            message: "Upload preset not found".to_string(),
        }))
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Uploads block until [`MockUploader::release`] is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Gate::default());
        self
    }

    pub async fn wait_until_started(&self) {
        Gate::wait_until_started(&self.gate).await;
    }

    pub fn release(&self) {
        Gate::release(&self.gate);
    }

    pub fn upload_count(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn uploaded(&self) -> Vec<ImageFile> {
        self.uploaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageUploader for MockUploader {
    async fn upload(&self, image: &ImageFile) -> Result<UploadedImage, UploadError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.log.record("upload");
        self.uploaded.lock().unwrap().push(image.clone());

        Gate::pass(&self.gate).await;

        self.result.clone()
    }
}
