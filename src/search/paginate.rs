//! Sequential pagination with distinct-user aggregation

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::error::Result;

use super::retry::fetch_page;
use super::transport::Transport;
use super::SearchQuery;

/// Running result of one poll: total items received and the distinct set of
/// reporter logins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub received: usize,
    pub users: BTreeSet<String>,
}

/// Page through all results for `query`, merging reporter logins into one
/// distinct set.
///
/// `total_count` as reported by each page is authoritative and assumed stable
/// within a run: the loop stops once the cumulative item count reaches it. Any
/// page failure aborts the run, discarding the partial aggregate.
pub async fn collect_users<T: Transport + ?Sized>(
    transport: &T,
    query: &SearchQuery,
) -> Result<Aggregate> {
    let mut aggregate = Aggregate::default();
    let mut page = 1u32;

    loop {
        let results = fetch_page(transport, &query.page_url(page)).await?;

        // An empty page below total_count means the upstream stopped
        // delivering (e.g. the search result cap); keep the loop total.
        if results.items.is_empty() && aggregate.received < results.total_count {
            warn!(
                "Page {page}: empty page with only {} of {} items received, stopping",
                aggregate.received, results.total_count
            );
            return Ok(aggregate);
        }

        aggregate.received += results.items.len();
        aggregate
            .users
            .extend(results.items.into_iter().map(|item| item.user.login));

        info!(
            "Page {page}: items received so far: {} / {}",
            aggregate.received, results.total_count
        );
        info!("Page {page}: number of users so far: {}", aggregate.users.len());

        if aggregate.received >= results.total_count {
            return Ok(aggregate);
        }
        page += 1;
    }
}
