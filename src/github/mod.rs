pub mod client;
pub mod contributions;
pub mod history;
pub mod types;

pub use client::GitHubClient;
