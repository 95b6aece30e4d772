use std::time::Duration;

use async_trait::async_trait;
use folio_types::{
    rpc::{
        RpcErrorResponse, RpcResponse, SlugInput, GET_PROJECT_BY_SLUG, LIST_PROJECTS, RPC_PATH,
        UPDATE_PROJECT,
    },
    Project,
};
use moka::sync::Cache;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::{error::CallError, MutationError, ProjectApi, QueryError};

const CACHE_TTL: Duration = Duration::from_secs(30);
const CACHE_CAPACITY: u64 = 256;

/// HTTP client for the API server's RPC endpoints.
///
/// Reads by slug are cached briefly; a successful update refreshes the
/// cached entry for its slug.
#[derive(Clone)]
pub struct RpcProjectClient {
    http: Client,
    base_url: String,
    by_slug: Cache<String, Option<Project>>,
}

impl RpcProjectClient {
    pub fn new(api_url: &str) -> Result<Self, url::ParseError> {
        let base_url = api_url.trim_end_matches('/');
        Url::parse(base_url)?;

        Ok(Self {
            http: Client::new(),
            base_url: base_url.to_string(),
            by_slug: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build(),
        })
    }

    fn endpoint(&self, procedure: &str) -> String {
        format!("{}{}/{}", self.base_url, RPC_PATH, procedure)
    }

    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CallError> {
        let response = request
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        if !status.is_success() {
            let error = serde_json::from_str::<RpcErrorResponse>(&body)
                .ok()
                .map(|r| r.error);
            tracing::warn!(status = status.as_u16(), "rpc call failed: {}", body);
            return Err(CallError::Status {
                status: status.as_u16(),
                error,
            });
        }

        serde_json::from_str::<RpcResponse<T>>(&body)
            .map(RpcResponse::into_data)
            .map_err(|e| CallError::Malformed(format!("Failed to parse rpc response: {e}")))
    }
}

#[async_trait]
impl ProjectApi for RpcProjectClient {
    #[instrument(skip(self))]
    async fn get_project_by_slug(&self, slug: &str) -> Result<Option<Project>, QueryError> {
        if let Some(cached) = self.by_slug.get(slug) {
            tracing::debug!("cache hit for '{}'", slug);
            return Ok(cached);
        }

        let input = serde_json::to_string(&SlugInput {
            slug: slug.to_string(),
        })
        .map_err(|e| QueryError::MalformedResponse(e.to_string()))?;
        let request = self
            .http
            .get(self.endpoint(GET_PROJECT_BY_SLUG))
            .query(&[("input", input)]);

        let project: Option<Project> = self.call(request).await?;
        self.by_slug.insert(slug.to_string(), project.clone());

        Ok(project)
    }

    #[instrument(skip(self))]
    async fn list_projects(&self) -> Result<Vec<Project>, QueryError> {
        let request = self.http.get(self.endpoint(LIST_PROJECTS));
        Ok(self.call(request).await?)
    }

    #[instrument(skip(self, project), fields(slug = %project.slug))]
    async fn update_project(&self, project: &Project) -> Result<Project, MutationError> {
        let request = self.http.post(self.endpoint(UPDATE_PROJECT)).json(project);

        let stored: Project = self.call(request).await?;
        self.by_slug
            .insert(stored.slug.to_string(), Some(stored.clone()));

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    };
    use folio_types::{
        rpc::{RpcErrorCode, RpcErrorResponse},
        ProjectField, Slug, ValidationErrors,
    };
    use serde::Deserialize;
    use time::macros::date;
    use tokio::net::TcpListener;

    use super::*;

    #[derive(Clone, Default)]
    struct FakeServer {
        projects: Arc<Mutex<HashMap<String, Project>>>,
        reads: Arc<AtomicUsize>,
    }

    #[derive(Deserialize)]
    struct RpcQuery {
        input: String,
    }

    async fn get_by_slug(
        State(server): State<FakeServer>,
        Query(query): Query<RpcQuery>,
    ) -> Json<RpcResponse<Option<Project>>> {
        server.reads.fetch_add(1, Ordering::SeqCst);
        let input: SlugInput = serde_json::from_str(&query.input).unwrap();
        let project = server.projects.lock().unwrap().get(&input.slug).cloned();
        Json(RpcResponse::new(project))
    }

    async fn list(State(server): State<FakeServer>) -> Json<RpcResponse<Vec<Project>>> {
        let projects = server.projects.lock().unwrap().values().cloned().collect();
        Json(RpcResponse::new(projects))
    }

    async fn update(State(server): State<FakeServer>, Json(project): Json<Project>) -> Response {
        if project.place.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add(ProjectField::Place, "Place is required");
            let body = RpcErrorResponse::new(RpcErrorCode::BadRequest, "invalid project")
                .with_field_errors(errors);
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        let mut projects = server.projects.lock().unwrap();
        match projects.get_mut(project.slug.as_str()) {
            Some(stored) => {
                *stored = project.clone();
                Json(RpcResponse::new(project)).into_response()
            }
            None => {
                let body = RpcErrorResponse::new(
                    RpcErrorCode::NotFound,
                    format!("project not found: {}", project.slug),
                );
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
        }
    }

    fn acme() -> Project {
        Project {
            slug: Slug::try_from("acme-hq").unwrap(),
            title: "Acme HQ".to_string(),
            place: "Oslo".to_string(),
            client: "Acme".to_string(),
            content: "<p>Head office</p>".to_string(),
            summary: "New head office".to_string(),
            date: date!(2023 - 05 - 17),
            thumbnail: "https://img/old.png".to_string(),
        }
    }

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{address}")
    }

    async fn fake_server(projects: Vec<Project>) -> (FakeServer, RpcProjectClient) {
        let server = FakeServer::default();
        {
            let mut stored = server.projects.lock().unwrap();
            for project in projects {
                stored.insert(project.slug.to_string(), project);
            }
        }

        let router = Router::new()
            .route("/api/trpc/project.getProjectBySlug", get(get_by_slug))
            .route("/api/trpc/project.listProjects", get(list))
            .route("/api/trpc/project.updateProject", post(update))
            .with_state(server.clone());
        let base_url = spawn(router).await;

        (server, RpcProjectClient::new(&base_url).unwrap())
    }

    #[tokio::test]
    async fn reads_project_by_slug() {
        let (_, client) = fake_server(vec![acme()]).await;

        let project = client.get_project_by_slug("acme-hq").await.unwrap();
        assert_eq!(project, Some(acme()));
    }

    #[tokio::test]
    async fn unknown_slug_is_absent_not_an_error() {
        let (_, client) = fake_server(vec![]).await;

        assert_eq!(client.get_project_by_slug("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn repeated_reads_are_served_from_cache() {
        let (server, client) = fake_server(vec![acme()]).await;

        client.get_project_by_slug("acme-hq").await.unwrap();
        client.get_project_by_slug("acme-hq").await.unwrap();

        assert_eq!(server.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_refreshes_cached_read() {
        let (server, client) = fake_server(vec![acme()]).await;
        client.get_project_by_slug("acme-hq").await.unwrap();

        let mut changed = acme();
        changed.title = "Acme Tower".to_string();
        let stored = client.update_project(&changed).await.unwrap();
        assert_eq!(stored, changed);

        let read = client.get_project_by_slug("acme-hq").await.unwrap();
        assert_eq!(read, Some(changed));
        assert_eq!(server.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_slug_is_not_found() {
        let (_, client) = fake_server(vec![]).await;

        let err = client.update_project(&acme()).await.unwrap_err();
        assert!(matches!(err, MutationError::NotFound(_)));
    }

    #[tokio::test]
    async fn rejected_update_carries_field_errors() {
        let (_, client) = fake_server(vec![acme()]).await;
        let mut blank = acme();
        blank.place.clear();

        match client.update_project(&blank).await.unwrap_err() {
            MutationError::Rejected { field_errors, .. } => {
                let errors = field_errors.unwrap();
                assert_eq!(errors.get(ProjectField::Place), Some("Place is required"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_returns_all_projects() {
        let (_, client) = fake_server(vec![acme()]).await;

        assert_eq!(client.list_projects().await.unwrap(), vec![acme()]);
    }

    #[tokio::test]
    async fn non_envelope_body_is_malformed() {
        let router = Router::new().route(
            "/api/trpc/project.listProjects",
            get(|| async { "not json" }),
        );
        let client = RpcProjectClient::new(&spawn(router).await).unwrap();

        let err = client.list_projects().await.unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = RpcProjectClient::new(&format!("http://{address}")).unwrap();
        let err = client.update_project(&acme()).await.unwrap_err();
        assert!(matches!(err, MutationError::Transport(_)));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(RpcProjectClient::new("not a url").is_err());
    }
}
