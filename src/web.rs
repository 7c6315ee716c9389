use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::dataset::Dataset;
use crate::entry::Entry;
use crate::extraction::extract_themes;
use crate::llm::ModelRunner;
use crate::preview::Preview;
use crate::prompt::theme_prompt;
use crate::selector::EntryId;
use crate::TARGET_WEB_REQUEST;

/// Shared state of the HTTP viewer.
#[derive(Clone)]
pub struct AppState {
    pub dataset: &'static Dataset,
    pub runner: Arc<dyn ModelRunner>,
}

/// One row of the entry list.
#[derive(Serialize)]
struct EntrySummary {
    id: EntryId,
    label: String,
}

#[derive(Serialize)]
struct PromptResponse {
    prompt: String,
}

#[derive(Serialize)]
struct ThemesResponse {
    themes: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Failures reported to HTTP clients.
#[derive(Debug)]
enum ApiError {
    NotFound(EntryId),
    Model(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(id) => (StatusCode::NOT_FOUND, format!("no selectable entry with id {}", id)),
            ApiError::Model(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/entries", get(list_entries))
        .route("/entries/{id}", get(show_entry))
        .route("/entries/{id}/prompt", get(show_prompt))
        .route("/entries/{id}/themes", post(extract_entry_themes))
        .with_state(state)
}

/// Runs the HTTP viewer until the process is stopped.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    info!(target: TARGET_WEB_REQUEST, "Server running on http://{}", addr);

    axum::serve(listener, router(state).into_make_service()).await?;

    Ok(())
}

fn selectable(state: &AppState, id: EntryId) -> std::result::Result<&'static Entry, ApiError> {
    state.dataset.get_selectable(id).ok_or_else(|| {
        warn!(target: TARGET_WEB_REQUEST, "Request for unknown entry {}", id);
        ApiError::NotFound(id)
    })
}

/// Lists the selectable entries with their labels.
async fn list_entries(State(state): State<AppState>) -> Json<Vec<EntrySummary>> {
    let entries = state
        .dataset
        .selectable()
        .into_iter()
        .map(|selected| EntrySummary {
            id: selected.id,
            label: selected.label(),
        })
        .collect();
    Json(entries)
}

async fn show_entry(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
) -> std::result::Result<Json<Preview>, ApiError> {
    let entry = selectable(&state, id)?;
    Ok(Json(Preview::new(entry)))
}

async fn show_prompt(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
) -> std::result::Result<Json<PromptResponse>, ApiError> {
    let entry = selectable(&state, id)?;
    Ok(Json(PromptResponse {
        prompt: theme_prompt(entry),
    }))
}

/// Runs the model for one entry. The model call blocks, so it runs on the
/// blocking thread pool.
async fn extract_entry_themes(
    State(state): State<AppState>,
    Path(id): Path<EntryId>,
) -> std::result::Result<Json<ThemesResponse>, ApiError> {
    let entry = selectable(&state, id)?;
    let runner = state.runner.clone();

    let result = tokio::task::spawn_blocking(move || extract_themes(entry, runner.as_ref()))
        .await
        .map_err(|e| {
            error!(target: TARGET_WEB_REQUEST, "Theme extraction task failed: {}", e);
            ApiError::Internal(e.to_string())
        })?;

    match result {
        Ok(themes) => Ok(Json(ThemesResponse {
            themes: themes.trim().to_string(),
        })),
        Err(e) => {
            error!(target: TARGET_WEB_REQUEST, "Theme extraction for entry {} failed: {}", id, e);
            Err(ApiError::Model(e.to_string()))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::entry::Link;
    use crate::testing::{FixedRunner, MissingRunner};
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_dataset() -> &'static Dataset {
        let mut bare = Entry::article("Bare", "https://example.org/bare", "");
        bare.content = None;
        Box::leak(Box::new(Dataset::from_entries(vec![
            Entry::article("Hearing Basics", "https://example.org/hearing", "Tinnitus and hearing aids."),
            bare,
            Entry::landing_page(
                "Health Hub",
                "https://example.org/hub",
                None,
                vec![Link::new("Sleep", "https://example.org/sleep")],
            ),
        ])))
    }

    fn app(runner: Arc<dyn ModelRunner>) -> Router {
        router(AppState {
            dataset: test_dataset(),
            runner,
        })
    }

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_list_entries() {
        let (status, body) = send(app(Arc::new(FixedRunner::new(""))), Method::GET, "/entries").await;

        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["id"], 0);
        assert_eq!(entries[0]["label"], "Hearing Basics (article)");
        assert_eq!(entries[1]["id"], 2);
        assert_eq!(entries[1]["label"], "Health Hub (landing_page)");
    }

    #[tokio::test]
    async fn test_show_entry() {
        let (status, body) = send(app(Arc::new(FixedRunner::new(""))), Method::GET, "/entries/2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "landing_page");
        assert_eq!(body["content"], Value::Null);
        assert_eq!(body["links"][0][0], "Sleep");
    }

    #[tokio::test]
    async fn test_non_selectable_entry_is_not_found() {
        let runner: Arc<dyn ModelRunner> = Arc::new(FixedRunner::new(""));
        let (status, _) = send(app(runner.clone()), Method::GET, "/entries/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app(runner), Method::POST, "/entries/42/themes").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_show_prompt() {
        let (status, body) = send(app(Arc::new(FixedRunner::new(""))), Method::GET, "/entries/0/prompt").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["prompt"].as_str().unwrap().contains("Tinnitus and hearing aids."));
    }

    #[tokio::test]
    async fn test_extract_themes() {
        let runner = Arc::new(FixedRunner::new("\n- Tinnitus\n- Hearing Aids\n"));
        let (status, body) = send(app(runner.clone()), Method::POST, "/entries/0/themes").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["themes"], "- Tinnitus\n- Hearing Aids");
        assert_eq!(runner.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_extract_themes_model_missing() {
        let (status, body) = send(app(Arc::new(MissingRunner)), Method::POST, "/entries/0/themes").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("ollama"));
    }
}
