//! `project.*` procedures over HTTP.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use folio_types::{
    rpc::{RpcResponse, SlugInput, GET_PROJECT_BY_SLUG, LIST_PROJECTS, UPDATE_PROJECT},
    Project,
};
use serde::Deserialize;
use tracing::instrument;

use super::ApiError;
use crate::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(&format!("/{GET_PROJECT_BY_SLUG}"), get(get_project_by_slug))
        .route(&format!("/{LIST_PROJECTS}"), get(list_projects))
        .route(&format!("/{UPDATE_PROJECT}"), post(update_project))
}

/// Query string of an RPC query: the input is JSON in `input`.
#[derive(Debug, Deserialize)]
struct RpcQuery {
    input: Option<String>,
}

#[instrument(name = "GET project.getProjectBySlug", skip(app_state))]
async fn get_project_by_slug(
    State(app_state): State<AppState>,
    Query(query): Query<RpcQuery>,
) -> Result<Json<RpcResponse<Option<Project>>>, ApiError> {
    let raw = query
        .input
        .ok_or_else(|| ApiError::bad_request("missing input"))?;
    let input: SlugInput = serde_json::from_str(&raw)
        .map_err(|e| ApiError::bad_request(format!("invalid input: {e}")))?;

    let project = app_state
        .project_service
        .get_project_by_slug(&input.slug)
        .await?;

    Ok(Json(RpcResponse::new(project)))
}

#[instrument(name = "GET project.listProjects", skip(app_state))]
async fn list_projects(
    State(app_state): State<AppState>,
) -> Result<Json<RpcResponse<Vec<Project>>>, ApiError> {
    let projects = app_state.project_service.list_projects().await?;

    Ok(Json(RpcResponse::new(projects)))
}

#[instrument(name = "POST project.updateProject", skip(app_state, payload))]
async fn update_project(
    State(app_state): State<AppState>,
    payload: Result<Json<Project>, JsonRejection>,
) -> Result<Json<RpcResponse<Project>>, ApiError> {
    let Json(project) = payload.map_err(|rejection| {
        tracing::debug!("rejected update payload: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })?;

    let stored = app_state.project_service.update_project(project).await?;

    Ok(Json(RpcResponse::new(stored)))
}
