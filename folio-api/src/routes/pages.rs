use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::instrument;

use crate::{app_state::AppState, domain::ProjectError, pages::ProjectPage};

pub fn router() -> Router<AppState> {
    Router::new().route("/projects/:slug", get(project_page))
}

/// A page that could not be rendered.
pub struct PageError(ProjectError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("failed to render page: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<!DOCTYPE html><title>Error</title><h1>Something went wrong</h1>"),
        )
            .into_response()
    }
}

#[instrument(name = "GET /projects/:slug", skip(app_state))]
async fn project_page(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let page = ProjectPage::load(app_state.project_service.as_ref(), &slug, &app_state.site_name)
        .await
        .map_err(PageError)?;
    tracing::debug!(found = page.found, "rendering project page");

    Ok(Html(page.render()))
}
