//! API route handlers - maps HTTP endpoints to GitHub lookups.
//!
//! Each submodule defines routes for a feature area:
//! - `git_history`: Recent pushed commits (GET /api/git-history)
//! - `contributions`: Contribution calendar (GET /api/github-contributions)
//! - `health`: Liveness probe (GET /health)

pub mod contributions;
pub mod git_history;
pub mod health;

use axum::Router;

use crate::state::SharedState;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .merge(git_history::routes(state.clone()))
        .merge(contributions::routes(state))
        .merge(health::routes())
}
