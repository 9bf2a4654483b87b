//! Resolved runtime configuration shared by the GitHub client and routes.

pub const DEFAULT_GITHUB_USER: &str = "ALVINfrs";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Number of public events requested from the events endpoint.
pub const EVENTS_PER_PAGE: u32 = 100;

/// Commits kept (and enriched) by the history aggregator.
pub const RECENT_COMMIT_LIMIT: usize = 5;

/// `Cache-Control` max-age for the git history response, in seconds.
pub const HISTORY_MAX_AGE_SECS: u64 = 900;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Personal access token. Absence is reported per request, not at startup.
    pub github_token: Option<String>,
    /// Account whose push history backs `/api/git-history`.
    pub github_user: String,
    pub api_url: String,
    pub graphql_url: String,
}

impl AppConfig {
    pub fn new(github_token: Option<String>) -> Self {
        Self {
            // An empty GITHUB_PAT counts as unset.
            github_token: github_token.filter(|t| !t.trim().is_empty()),
            github_user: DEFAULT_GITHUB_USER.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
        }
    }

    pub fn with_github_user(mut self, user: impl Into<String>) -> Self {
        self.github_user = user.into();
        self
    }

    /// Point both REST and GraphQL at a different host (GitHub Enterprise, tests).
    pub fn with_api_urls(
        mut self,
        api_url: impl Into<String>,
        graphql_url: impl Into<String>,
    ) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self.graphql_url = graphql_url.into();
        self
    }
}
