//! Contribution calendar endpoint.
//!
//! GET /api/github-contributions?username=
//!
//! Returns the user's contribution days for the past year as a flat,
//! chronologically ordered list. When `username` is repeated, the first
//! value wins.
//!
//! Used by: contribution heatmap in the dev stats section

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::error::{AppError, Result};
use crate::models::ContributionDay;
use crate::state::SharedState;

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/github-contributions", get(get_contributions))
        .with_state(state)
}

/// First non-blank `username` value among the query pairs.
fn first_username(params: Vec<(String, String)>) -> Option<String> {
    params
        .into_iter()
        .find(|(key, _)| key == "username")
        .map(|(_, value)| value)
        .filter(|value| !value.trim().is_empty())
}

async fn get_contributions(
    State(state): State<SharedState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<ContributionDay>>> {
    let username = first_username(params)
        .ok_or_else(|| AppError::BadRequest("Username is required".to_string()))?;

    let days = state.client.contribution_days(&username).await?;
    Ok(Json(days))
}
