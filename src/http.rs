// HTTP composition: three routes, a logging decorator, and the CORS gate.
//
// Responsibilities
// - /query executes GraphQL, /playground serves the client UI, everything
//   else falls through to the static web app.
// - Log one line per request (method, path, remote address) before the
//   handler runs.
// - Outside production, relax CORS on /query only; other routes are never
//   wrapped.

use std::net::SocketAddr;
use std::path::Path;

use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::GraphQL;
use axum::extract::{ConnectInfo, Request};
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::Profile;
use crate::graphql::AppSchema;

pub fn router(schema: AppSchema, profile: Profile, static_dir: &Path) -> Router {
    let query = Router::new().route_service("/query", GraphQL::new(schema));
    let query = match profile {
        // Local clients (playground, webapp dev server) call from another
        // origin; in production the webapp is served from this same host.
        Profile::Development => query.layer(CorsLayer::permissive()),
        Profile::Production => query,
    };

    Router::new()
        .merge(query)
        .route("/playground", get(playground))
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(log_request))
}

async fn playground() -> Html<String> {
    Html(playground_source(GraphQLPlaygroundConfig::new("/query")))
}

async fn log_request(request: Request, next: Next) -> Response {
    // Connection info is absent when the router is driven in-process.
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string());
    tracing::info!(
        method = %request.method(),
        path = %request.uri().path(),
        remote = %remote.as_deref().unwrap_or("-"),
        "received request"
    );
    next.run(request).await
}
