//! Client for the remote prioritization service.
//!
//! The service owns the scoring algorithm; this side only carries batches to
//! it and envelopes back. `Prioritizer` is the seam the interaction loop
//! talks through, so tests can substitute an in-process fake for the HTTP
//! implementation.

mod error;
mod http;

pub use error::RemoteError;
pub use http::HttpPrioritizer;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;

use crate::task::{ResponseEnvelope, TaskRecord};

/// Strategy selector for the analyze operation.
///
/// The service interprets the wire value; this client passes it through
/// unexamined and only fixes the set the user can pick from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Default,
    Deadline,
    Importance,
    Effort,
}

impl Strategy {
    /// All selectable strategies, in menu order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Default,
        Strategy::Deadline,
        Strategy::Importance,
        Strategy::Effort,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Deadline => "deadline",
            Self::Importance => "importance",
            Self::Effort => "effort",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "deadline" => Ok(Self::Deadline),
            "importance" => Ok(Self::Importance),
            "effort" => Ok(Self::Effort),
            other => Err(format!(
                "unknown strategy '{other}' (expected one of: default, deadline, importance, effort)"
            )),
        }
    }
}

/// A remote operation that scores task batches.
///
/// Callers must not invoke either operation with an empty batch; that guard
/// lives at the action boundary, not here.
#[async_trait]
pub trait Prioritizer: Send + Sync {
    /// Score the batch with the given strategy. Idempotent for a fixed batch
    /// and strategy as far as this client is concerned.
    async fn analyze(
        &self,
        tasks: &[TaskRecord],
        strategy: Strategy,
    ) -> Result<ResponseEnvelope, RemoteError>;

    /// Ask the service for its top picks plus a summary line. May be
    /// non-deterministic server-side; results are never cached or deduped.
    async fn suggest(&self, tasks: &[TaskRecord]) -> Result<ResponseEnvelope, RemoteError>;
}
