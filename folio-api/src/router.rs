use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, routes};

pub fn create(app_state: AppState, config: &Settings) -> Router<()> {
    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .nest(folio_types::rpc::RPC_PATH, routes::rpc::router())
        .merge(routes::pages::router());

    let app_url = config.application.app_url.trim_end_matches('/').to_string();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_url
        }));

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
