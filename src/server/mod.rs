//! JSON API server

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::Error;
use crate::query::{ListParams, ListQuery};
use crate::Blog;

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// A failed request rendered as an HTTP response
#[derive(Debug)]
pub enum ApiError {
    Blog(Error),
    /// The load task panicked or was cancelled
    Task(tokio::task::JoinError),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Blog(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Blog(err) => (status_for(err), err.to_string()),
            ApiError::Task(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        } else {
            tracing::debug!("Request rejected: {}", message);
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// HTTP status for an error
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::DocumentNotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        Error::MalformedFrontMatter { .. } | Error::InvalidMetadata { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Default, Deserialize)]
struct RelatedParams {
    limit: Option<String>,
}

/// Build the API router
pub fn router(blog: Arc<Blog>) -> Router {
    Router::new()
        .route("/api/blog", get(list_posts))
        .route("/api/blog/:slug", get(get_post))
        .route("/api/blog/:slug/related", get(related_posts))
        .route("/api/categories", get(categories))
        .route("/api/tags", get(tags))
        .layer(TraceLayer::new_for_http())
        .with_state(blog)
}

/// Start the API server
pub async fn start(blog: Blog, ip: &str, port: u16) -> Result<()> {
    let title = blog.config.title.clone();
    let app = router(Arc::new(blog));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("Serving {} at http://{}:{}/api/blog", title, ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a blocking load on the blocking pool
async fn blocking<T, F>(blog: Arc<Blog>, f: F) -> Result<Json<T>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Blog) -> crate::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || f(&blog)).await {
        Ok(result) => result.map(Json).map_err(ApiError::from),
        Err(e) => Err(ApiError::Task(e)),
    }
}

async fn list_posts(
    State(blog): State<Arc<Blog>>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let query = ListQuery::from_params(&params);
    blocking(blog, move |blog| blog.list(&query)).await
}

async fn get_post(State(blog): State<Arc<Blog>>, Path(slug): Path<String>) -> impl IntoResponse {
    blocking(blog, move |blog| blog.post(&slug)).await
}

async fn related_posts(
    State(blog): State<Arc<Blog>>,
    Path(slug): Path<String>,
    Query(params): Query<RelatedParams>,
) -> impl IntoResponse {
    let limit = params
        .limit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|n| *n > 0);
    blocking(blog, move |blog| blog.related(&slug, limit)).await
}

async fn categories(State(blog): State<Arc<Blog>>) -> impl IntoResponse {
    blocking(blog, |blog| blog.categories()).await
}

async fn tags(State(blog): State<Arc<Blog>>) -> impl IntoResponse {
    blocking(blog, |blog| blog.tags()).await
}
