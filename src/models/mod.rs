//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for frontend consumption.
//! - `commit`: CommitRecord, CommitType for the git history timeline
//! - `contribution`: ContributionDay for the contribution heatmap

pub mod commit;
pub mod contribution;

pub use commit::*;
pub use contribution::*;
