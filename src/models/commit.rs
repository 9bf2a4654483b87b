use serde::{Deserialize, Serialize};

/// Conventional-commit prefixes recognized in commit messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Style,
    Docs,
    Refactor,
    Test,
    Chore,
}

impl CommitType {
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "feat" => Some(CommitType::Feat),
            "fix" => Some(CommitType::Fix),
            "style" => Some(CommitType::Style),
            "docs" => Some(CommitType::Docs),
            "refactor" => Some(CommitType::Refactor),
            "test" => Some(CommitType::Test),
            "chore" => Some(CommitType::Chore),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Style => "style",
            CommitType::Docs => "docs",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }
}

/// One entry of the git history timeline shown on the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: usize,
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub time: String,
    pub repo: String,
    pub branch: String,
    #[serde(rename = "type")]
    pub kind: CommitType,
    pub files: Vec<String>,
}
