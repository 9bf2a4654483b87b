//! Recent commit history built from a user's public push events.
//!
//! Flow: events → push commits (flattened, newest first) → first N → per-commit
//! file lists fetched concurrently → `CommitRecord`s with sequential ids.
//!
//! A failed per-commit lookup only empties that record's `files`; a failed
//! events fetch fails the whole request.

use std::fmt::Display;
use std::sync::LazyLock;

use chrono::{DateTime, Local, TimeZone, Utc};
use regex::Regex;
use tokio::task::JoinSet;

use crate::config::EVENTS_PER_PAGE;
use crate::error::{AppError, Result};
use crate::github::client::{GitHubClient, decode, status_text};
use crate::github::types::{CommitDetailResponse, Event};
use crate::models::{CommitRecord, CommitType};

static COMMIT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|style|docs|refactor|test|chore)(\(.*\))?:\s*(.*)")
        .expect("invalid regex")
});

const PUSH_EVENT: &str = "PushEvent";
const HEADS_PREFIX: &str = "refs/heads/";

/// A commit lifted out of a push event, tagged with where it was pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct PushedCommit {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub authored_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub repo: String,
    pub branch: String,
}

/// What the per-commit endpoint adds to a pushed commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitDetail {
    pub files: Vec<String>,
    pub authored_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub kind: CommitType,
    pub message: String,
}

/// Split a conventional-commit prefix off a message.
///
/// `feat(ui): add x` → (`feat`, `add x`). Messages without a recognized prefix
/// are classified `chore` and returned unchanged.
pub fn parse_commit_message(message: &str) -> ParsedMessage {
    let matched = COMMIT_PREFIX_RE.captures(message).and_then(|caps| {
        let kind = CommitType::from_prefix(caps.get(1)?.as_str())?;
        let rest = caps.get(3).map_or("", |m| m.as_str());
        Some(ParsedMessage {
            kind,
            message: rest.to_string(),
        })
    });

    matched.unwrap_or_else(|| ParsedMessage {
        kind: CommitType::Chore,
        message: message.to_string(),
    })
}

/// Branch name from a push ref. Refs outside `refs/heads/` are kept as-is.
pub fn branch_name(git_ref: &str) -> String {
    git_ref.strip_prefix(HEADS_PREFIX).unwrap_or(git_ref).to_string()
}

/// Flatten every push event's commits into one list, preserving event order.
pub fn flatten_push_commits(events: &[Event]) -> Vec<PushedCommit> {
    events
        .iter()
        .filter(|event| event.kind == PUSH_EVENT)
        .filter_map(|event| {
            let commits = event.payload.commits.as_ref().filter(|c| !c.is_empty())?;
            let branch = branch_name(event.payload.git_ref.as_deref().unwrap_or_default());
            Some(commits.iter().map(move |commit| PushedCommit {
                sha: commit.sha.clone(),
                message: commit.message.clone(),
                author: commit.author.name.clone(),
                authored_at: commit.author.date,
                pushed_at: event.created_at,
                repo: event.repo.name.clone(),
                branch: branch.clone(),
            }))
        })
        .flatten()
        .collect()
}

/// Calendar date (`YYYY-MM-DD`) and wall-clock time (`HH:MM`) in `tz`.
pub fn split_timestamp<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> (String, String)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(tz);
    (local.format("%Y-%m-%d").to_string(), local.format("%H:%M").to_string())
}

/// Shape pushed commits and their (optional) details into numbered records.
///
/// `details[i]` belongs to `commits[i]`; a `None` slot means the lookup failed.
pub fn build_records<Tz>(
    commits: Vec<PushedCommit>,
    details: Vec<Option<CommitDetail>>,
    tz: &Tz,
) -> Vec<CommitRecord>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    commits
        .into_iter()
        .zip(details)
        .enumerate()
        .map(|(idx, (commit, detail))| {
            let detail = detail.unwrap_or_default();
            let authored_at = detail
                .authored_at
                .or(commit.authored_at)
                .or(commit.pushed_at)
                .unwrap_or_else(Utc::now);
            let (date, time) = split_timestamp(&authored_at, tz);
            let parsed = parse_commit_message(&commit.message);

            CommitRecord {
                id: idx + 1,
                hash: commit.sha.chars().take(7).collect(),
                message: parsed.message,
                author: commit.author,
                date,
                time,
                repo: commit.repo,
                branch: commit.branch,
                kind: parsed.kind,
                files: detail.files,
            }
        })
        .collect()
}

impl GitHubClient {
    pub async fn public_events(&self, username: &str) -> Result<Vec<Event>> {
        let request = self
            .get(&format!("users/{username}/events/public"))?
            .query(&[("per_page", EVENTS_PER_PAGE)]);

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Failed to fetch events from GitHub: {}",
                status_text(&response)
            )));
        }

        decode(response, "events").await
    }

    pub async fn commit_detail(&self, repo: &str, sha: &str) -> Result<CommitDetail> {
        let response = self.get(&format!("repos/{repo}/commits/{sha}"))?.send().await?;
        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Failed to fetch commit {repo}@{sha}: {}",
                status_text(&response)
            )));
        }

        let detail: CommitDetailResponse = decode(response, "commit").await?;
        Ok(CommitDetail {
            files: detail.files.into_iter().map(|f| f.filename).collect(),
            authored_at: detail.commit.and_then(|c| c.author).and_then(|a| a.date),
        })
    }

    /// Fetch details for every commit as one concurrent batch.
    ///
    /// The result has one slot per input commit; failed lookups are `None`.
    async fn commit_details(&self, commits: &[PushedCommit]) -> Result<Vec<Option<CommitDetail>>> {
        let mut tasks = JoinSet::new();
        for (slot, commit) in commits.iter().enumerate() {
            let client = self.clone();
            let repo = commit.repo.clone();
            let sha = commit.sha.clone();
            tasks.spawn(async move {
                let detail = match client.commit_detail(&repo, &sha).await {
                    Ok(detail) => Some(detail),
                    Err(e) => {
                        tracing::warn!(
                            %repo,
                            %sha,
                            "commit detail lookup failed, files left empty: {}",
                            e
                        );
                        None
                    }
                };
                (slot, detail)
            });
        }

        let mut details: Vec<Option<CommitDetail>> = vec![None; commits.len()];
        while let Some(joined) = tasks.join_next().await {
            let (slot, detail) =
                joined.map_err(|e| AppError::Internal(format!("commit detail task failed: {e}")))?;
            details[slot] = detail;
        }

        Ok(details)
    }

    /// The `limit` most recently pushed commits of `username`, across all repos.
    pub async fn recent_commits(&self, username: &str, limit: usize) -> Result<Vec<CommitRecord>> {
        let events = self.public_events(username).await?;

        let mut commits = flatten_push_commits(&events);
        tracing::debug!(events = events.len(), commits = commits.len(), "flattened push events");
        commits.truncate(limit);

        let details = self.commit_details(&commits).await?;
        Ok(build_records(commits, details, &Local))
    }
}
