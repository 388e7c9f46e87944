//! GitHub issue-search query model and retrieval
//!
//! One fixed query shape: open `windows`-related Python bug issues within a
//! creation-time window, sorted by creation time ascending. Retrieval pages
//! through the results with bounded retries per request.

mod paginate;
mod retry;
pub mod transport;

pub use paginate::{collect_users, Aggregate};
pub use retry::fetch_page;
pub use transport::{FetchError, GithubTransport, RawResponse, Transport};

use serde::Deserialize;
use url::Url;

use crate::checkpoint::QueryWindow;

pub const SEARCH_ENDPOINT: &str = "https://api.github.com/search/issues";

/// One page of search results, as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub total_count: usize,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

/// Encoded search query for one run's window. The filter predicates are fixed;
/// only the creation-time range and the page number vary.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    q: String,
}

impl SearchQuery {
    pub fn bug_reports(window: &QueryWindow) -> Self {
        Self {
            q: format!(
                "windows label:bug language:python state:open is:issue created:{}..{}",
                window.from, window.to
            ),
        }
    }

    pub fn page_url(&self, page: u32) -> Url {
        Url::parse_with_params(
            SEARCH_ENDPOINT,
            &[
                ("q", self.q.as_str()),
                ("sort", "created"),
                ("order", "asc"),
                ("page", page.to_string().as_str()),
            ],
        )
        .expect("search endpoint is a valid base URL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> QueryWindow {
        QueryWindow {
            from: "2024-01-01T00:00:00Z".to_string(),
            to: "2024-01-02T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_query_carries_fixed_filter_and_window() {
        let url = SearchQuery::bug_reports(&window()).page_url(1);

        assert_eq!(url.host_str(), Some("api.github.com"));
        assert_eq!(url.path(), "/search/issues");
        let q = url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(
            q,
            "windows label:bug language:python state:open is:issue \
             created:2024-01-01T00:00:00Z..2024-01-02T00:00:00Z"
        );
    }

    #[test]
    fn test_page_number_is_the_only_moving_part() {
        let query = SearchQuery::bug_reports(&window());
        let first = query.page_url(1);
        let third = query.page_url(3);

        let strip_page = |url: &Url| {
            url.query_pairs()
                .filter(|(k, _)| k != "page")
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
        };
        assert_eq!(strip_page(&first), strip_page(&third));
        assert!(third.query().unwrap().contains("page=3"));
    }

    #[test]
    fn test_sort_and_order_are_pinned() {
        let url = SearchQuery::bug_reports(&window()).page_url(1);
        let pairs: Vec<_> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&("sort".to_string(), "created".to_string())));
        assert!(pairs.contains(&("order".to_string(), "asc".to_string())));
    }
}
