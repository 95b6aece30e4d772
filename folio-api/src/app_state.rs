use std::sync::Arc;

use crate::domain::ports::inbound::ProjectService;

#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectService>,
    pub site_name: Arc<str>,
}

impl AppState {
    pub fn new(project_service: Arc<dyn ProjectService>, site_name: impl Into<Arc<str>>) -> Self {
        Self {
            project_service,
            site_name: site_name.into(),
        }
    }
}
