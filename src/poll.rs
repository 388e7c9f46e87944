//! Single-run poll orchestration
//!
//! One run derives the query window from the previous checkpoint, pages
//! through all matching issues, and yields the updated checkpoint together
//! with the aggregated reporters. On failure no new checkpoint is produced;
//! the caller keeps the prior one so no creation-time range is ever skipped.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::checkpoint::Checkpoint;
use crate::error::Result;
use crate::search::{collect_users, Aggregate, SearchQuery, Transport};

/// Execute one poll against `transport` for the window between
/// `checkpoint.created_to` and `now`.
pub async fn run<T: Transport + ?Sized>(
    transport: &T,
    checkpoint: &Checkpoint,
    now: DateTime<Utc>,
) -> Result<(Checkpoint, Aggregate)> {
    let (window, next) = checkpoint.advance(now);
    debug!("Querying issues created between {} and {}", window.from, window.to);

    let query = SearchQuery::bug_reports(&window);
    let aggregate = collect_users(transport, &query).await?;

    Ok((next, aggregate))
}
