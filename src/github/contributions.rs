//! Yearly contribution calendar via the GraphQL API.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::github::client::{GitHubClient, decode, status_text};
use crate::github::types::{
    ContributionCalendar, ContributionsData, GraphQlRequest, GraphQlResponse,
};
use crate::models::ContributionDay;

const CONTRIBUTIONS_QUERY: &str = r#"
query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            color
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct ContributionsVariables<'a> {
    username: &'a str,
}

/// Flatten weeks → days, keeping GitHub's chronological order.
pub fn flatten_calendar(calendar: ContributionCalendar) -> Vec<ContributionDay> {
    calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .collect()
}

impl GitHubClient {
    pub async fn contribution_calendar(&self, username: &str) -> Result<ContributionCalendar> {
        let body = GraphQlRequest {
            query: CONTRIBUTIONS_QUERY,
            variables: ContributionsVariables { username },
        };

        let response = self.graphql()?.json(&body).send().await?;
        if !response.status().is_success() {
            let reason = status_text(&response);
            let text = response.text().await.unwrap_or_default();
            tracing::error!(%reason, body = %text, "GitHub GraphQL request failed");
            return Err(AppError::Upstream(format!("Failed to fetch from GitHub API: {reason}")));
        }

        let payload: GraphQlResponse<ContributionsData> = decode(response, "GraphQL").await?;

        if let Some(errors) = payload.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            tracing::error!(?messages, "GitHub GraphQL returned errors");
            return Err(AppError::Upstream(messages.join("\n")));
        }

        let user = payload
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| AppError::Upstream(format!("GitHub user not found: {username}")))?;

        let calendar = user.contributions_collection.contribution_calendar;
        tracing::debug!(
            %username,
            total = calendar.total_contributions,
            weeks = calendar.weeks.len(),
            "fetched contribution calendar"
        );
        Ok(calendar)
    }

    pub async fn contribution_days(&self, username: &str) -> Result<Vec<ContributionDay>> {
        Ok(flatten_calendar(self.contribution_calendar(username).await?))
    }
}
