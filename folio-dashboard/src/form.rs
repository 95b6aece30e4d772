//! The edit form of one project.
//!
//! The form is mounted on a stored record and defaults its fields from it
//! once. A submit validates the entered values, uploads a newly selected
//! thumbnail if there is one, and then writes the full record back. Only
//! one submit runs at a time; a second one while the first is in flight is
//! ignored.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use folio_types::{Project, ProjectField, ProjectInput, ValidationErrors};
use time::Date;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::{api::MutationError, thumbnail::SelectedThumbnail, upload::ImageUploader, ProjectApi};

/// Where the dashboard goes after a successful save.
pub const PROJECTS_PATH: &str = "/dashboard/projects";

pub const SAVED_MESSAGE: &str = "Project updated";
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload thumbnail";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update project";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Validating,
    Uploading,
    Submitting,
    Settled(Settlement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A short notification shown once to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ToastKind::Success => write!(f, "✓ {}", self.message),
            ToastKind::Error => write!(f, "✗ {}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submit was already in flight; nothing was sent.
    Ignored,
    /// The entered values are invalid; nothing was sent.
    Invalid(ValidationErrors),
    Saved {
        project: Project,
        toast: Toast,
        redirect: &'static str,
    },
    /// The upload or the update failed. The entered values are kept.
    Failed { toast: Toast },
}

struct FormState {
    /// Bumped each time the form is re-mounted on another record.
    mount: u64,
    record: Project,
    input: ProjectInput,
    errors: ValidationErrors,
    thumbnail: Option<SelectedThumbnail>,
    status: FormStatus,
}

impl FormState {
    fn for_record(mount: u64, record: Project) -> Self {
        Self {
            mount,
            input: record.to_input(),
            record,
            errors: ValidationErrors::new(),
            thumbnail: None,
            status: FormStatus::Idle,
        }
    }
}

/// Marks a submit as in flight until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct EditForm {
    api: Arc<dyn ProjectApi>,
    uploader: Arc<dyn ImageUploader>,
    state: Mutex<FormState>,
    in_flight: AtomicBool,
}

impl EditForm {
    /// Mounts the form on `record`, defaulting every field from it.
    pub fn mount(
        record: Project,
        api: Arc<dyn ProjectApi>,
        uploader: Arc<dyn ImageUploader>,
    ) -> Self {
        Self {
            api,
            uploader,
            state: Mutex::new(FormState::for_record(0, record)),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Called whenever the record is delivered again.
    ///
    /// The same slug keeps whatever the user has entered; a different slug
    /// starts over from the new record.
    pub async fn rerender(&self, record: &Project) {
        let mut state = self.state.lock().await;
        if state.record.slug == record.slug {
            return;
        }

        tracing::debug!("form re-mounted on '{}'", record.slug);
        *state = FormState::for_record(state.mount + 1, record.clone());
    }

    /// Editing a field clears its error.
    pub async fn set_field(&self, field: ProjectField, value: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.input.set(field, value);
        state.errors.remove(field);
    }

    pub async fn set_date(&self, date: Date) {
        let mut state = self.state.lock().await;
        state.input.set_date(date);
        state.errors.remove(ProjectField::Date);
    }

    /// Selects the new thumbnail, releasing any previous selection.
    pub async fn select_thumbnail(&self, thumbnail: SelectedThumbnail) {
        self.state.lock().await.thumbnail = Some(thumbnail);
    }

    pub async fn clear_thumbnail(&self) {
        self.state.lock().await.thumbnail = None;
    }

    /// The thumbnail to display: the selection's preview, else the stored URL.
    pub async fn thumbnail_url(&self) -> String {
        let state = self.state.lock().await;
        match &state.thumbnail {
            Some(selected) => selected.preview_url().to_string(),
            None => state.record.thumbnail.clone(),
        }
    }

    pub async fn values(&self) -> ProjectInput {
        self.state.lock().await.input.clone()
    }

    pub async fn errors(&self) -> ValidationErrors {
        self.state.lock().await.errors.clone()
    }

    pub async fn status(&self) -> FormStatus {
        self.state.lock().await.status
    }

    pub async fn has_selected_thumbnail(&self) -> bool {
        self.state.lock().await.thumbnail.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[instrument(skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("submit ignored, another one is in flight");
            return SubmitOutcome::Ignored;
        };

        let (mount, slug, fields, image, existing_thumbnail) = {
            let mut state = self.state.lock().await;
            state.status = FormStatus::Validating;

            let fields = match state.input.validate() {
                Ok(fields) => fields,
                Err(errors) => {
                    tracing::debug!("form is invalid: {}", errors);
                    state.errors = errors.clone();
                    state.status = FormStatus::Idle;
                    return SubmitOutcome::Invalid(errors);
                }
            };

            state.errors = ValidationErrors::new();
            let image = state.thumbnail.as_ref().map(|t| t.image().clone());
            state.status = if image.is_some() {
                FormStatus::Uploading
            } else {
                FormStatus::Submitting
            };

            (
                state.mount,
                state.record.slug.clone(),
                fields,
                image,
                state.record.thumbnail.clone(),
            )
        };

        let thumbnail = match image {
            Some(image) => match self.uploader.upload(&image).await {
                Ok(uploaded) => {
                    let mut state = self.state.lock().await;
                    if state.mount == mount {
                        state.status = FormStatus::Submitting;
                    }
                    uploaded.secure_url
                }
                Err(err) => {
                    tracing::warn!("thumbnail upload failed: {}", err);
                    return self.fail(mount, UPLOAD_FAILED_MESSAGE, None).await;
                }
            },
            None => existing_thumbnail,
        };

        let project = Project::from_fields(slug, fields, thumbnail);
        match self.api.update_project(&project).await {
            Ok(stored) => {
                tracing::info!("saved project '{}'", stored.slug);
                let mut state = self.state.lock().await;
                if state.mount == mount {
                    *state = FormState::for_record(mount, stored.clone());
                    state.status = FormStatus::Settled(Settlement::Success);
                } else {
                    tracing::debug!("form was re-mounted during the save, keeping its state");
                }

                SubmitOutcome::Saved {
                    project: stored,
                    toast: Toast::success(SAVED_MESSAGE),
                    redirect: PROJECTS_PATH,
                }
            }
            Err(err) => {
                tracing::warn!("project update failed: {}", err);
                let field_errors = match err {
                    MutationError::Rejected { field_errors, .. } => field_errors,
                    _ => None,
                };
                self.fail(mount, UPDATE_FAILED_MESSAGE, field_errors).await
            }
        }
    }

    async fn fail(
        &self,
        mount: u64,
        message: &str,
        field_errors: Option<ValidationErrors>,
    ) -> SubmitOutcome {
        let mut state = self.state.lock().await;
        if state.mount == mount {
            if let Some(errors) = field_errors {
                state.errors = errors;
            }
            state.status = FormStatus::Settled(Settlement::Failed);
        }

        SubmitOutcome::Failed {
            toast: Toast::error(message),
        }
    }
}
