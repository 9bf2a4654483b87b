//! Git history endpoint.
//!
//! GET /api/git-history
//!
//! Returns the most recent commits pushed by the configured GitHub user,
//! across all public repositories, each with its changed files.
//! Responses are cacheable for 15 minutes.
//!
//! Used by: git commit history timeline on the portfolio page

use axum::{
    Json, Router, extract::State, http::header::CACHE_CONTROL, response::IntoResponse,
    routing::get,
};

use crate::config::{HISTORY_MAX_AGE_SECS, RECENT_COMMIT_LIMIT};
use crate::error::Result;
use crate::state::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/git-history", get(get_git_history))
        .with_state(state)
}

async fn get_git_history(State(state): State<SharedState>) -> Result<impl IntoResponse> {
    let commits = state
        .client
        .recent_commits(&state.config.github_user, RECENT_COMMIT_LIMIT)
        .await?;

    let cache_control = format!("public, max-age={HISTORY_MAX_AGE_SECS}");
    Ok(([(CACHE_CONTROL, cache_control)], Json(commits)))
}
