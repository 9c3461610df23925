use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{info, warn};

use crate::{
    models::{Origin, RecommendationItem, UserInterestProfile, VideoSearchQuery},
    services::{heuristics, interests, providers::VideoSearchProvider, retry::RetryExecutor},
};

/// Appended to every search phrase to keep results within the platform's scope
pub const SEARCH_QUALIFIER: &str = "tech tutorial";

/// Interests sampled into one search phrase
const MAX_QUERY_INTERESTS: usize = 3;

/// External-source recommendation feed with a static safety net
///
/// Results come from the video search provider; when it is not configured,
/// fails after retries or returns nothing, the curated static list is served
/// instead so the feed is never empty.
pub struct RecommendationFetcher {
    search: Option<Arc<dyn VideoSearchProvider>>,
    executor: RetryExecutor,
    static_items: Vec<RecommendationItem>,
    rng: Mutex<StdRng>,
}

impl RecommendationFetcher {
    /// Creates a fetcher; `search = None` serves only the static list
    pub fn new(search: Option<Arc<dyn VideoSearchProvider>>, executor: RetryExecutor) -> Self {
        Self {
            search,
            executor,
            static_items: default_static_recommendations(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_static_items(mut self, items: Vec<RecommendationItem>) -> Self {
        self.static_items = items;
        self
    }

    /// Replaces the random source with a seeded one for repeatable queries
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Builds up to `count` recommendations for `profile`
    pub async fn fetch(&self, profile: &UserInterestProfile, count: usize) -> Vec<RecommendationItem> {
        if count == 0 {
            return Vec::new();
        }

        let Some(search) = self.search.as_deref() else {
            info!("Video search not configured, serving static recommendations");
            return self.static_fallback(count);
        };

        let interests = interests::extract(profile);
        let query = VideoSearchQuery::new(self.search_phrase(&interests), count);
        let query_ref = &query;

        let results = self
            .executor
            .execute("search_videos", || async move {
                search.search_videos(query_ref).await
            })
            .await;

        match results {
            Ok(results) if !results.is_empty() => {
                info!(
                    query = %query.phrase,
                    results = results.len(),
                    provider = search.name(),
                    "Serving external recommendations"
                );
                results
                    .into_iter()
                    .take(count)
                    .map(|result| {
                        let category = heuristics::classify_domain(&format!(
                            "{} {}",
                            result.title, result.description
                        ));
                        RecommendationItem::from_search_result(result, category.to_string())
                    })
                    .collect()
            }
            Ok(_) => {
                info!(query = %query.phrase, "Video search returned nothing, serving static recommendations");
                self.static_fallback(count)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    query = %query.phrase,
                    provider = search.name(),
                    "Video search unavailable, serving static recommendations"
                );
                self.static_fallback(count)
            }
        }
    }

    /// The static list truncated to `count`
    pub fn static_fallback(&self, count: usize) -> Vec<RecommendationItem> {
        self.static_items.iter().take(count).cloned().collect()
    }

    /// Up to three randomly chosen interests followed by [`SEARCH_QUALIFIER`]
    fn search_phrase(&self, interests: &[String]) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let mut terms: Vec<&str> = interests
            .choose_multiple(&mut *rng, MAX_QUERY_INTERESTS)
            .map(String::as_str)
            .collect();
        terms.push(SEARCH_QUALIFIER);
        terms.join(" ")
    }
}

/// Curated videos shown when the search provider cannot be used
pub fn default_static_recommendations() -> Vec<RecommendationItem> {
    [
        (
            "ZQL7tL2S0oQ",
            "The Complete Guide to GraphQL in 2025",
            "Schemas, resolvers and queries for building a GraphQL api.",
            "Web Simplified",
            "backend",
        ),
        (
            "bfmFfD2RIcg",
            "Machine Learning: Neural Networks Explained",
            "How neural networks learn, from perceptrons to backpropagation.",
            "AI Explained",
            "data_science",
        ),
        (
            "T5EANujRWBc",
            "React vs Vue vs Angular in 2025: Which One to Choose?",
            "Comparing the three major frontend frameworks.",
            "JS Framework Reviews",
            "web",
        ),
        (
            "gyMwXuJrbJQ",
            "Blockchain Development for Beginners",
            "Smart contracts and decentralized applications from scratch.",
            "Crypto Developer Hub",
            "general",
        ),
    ]
    .into_iter()
    .map(|(video_id, title, description, channel, category)| RecommendationItem {
        id: video_id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        thumbnail_url: format!("https://i.ytimg.com/vi/{}/maxresdefault.jpg", video_id),
        source_url: format!("https://www.youtube.com/watch?v={}", video_id),
        origin: Origin::InternalStatic,
        category: category.to_string(),
        channel_title: Some(channel.to_string()),
        published_at: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::RemoteError,
        models::VideoSearchResult,
        services::{providers::MockVideoSearchProvider, retry::RetryPolicy},
    };
    use std::time::Duration;

    fn executor() -> RetryExecutor {
        RetryExecutor::new(
            RetryPolicy {
                max_attempts: 2,
                initial_delay: Duration::from_millis(1),
                backoff_multiplier: 1.0,
                max_delay: Duration::from_millis(1),
            },
            Duration::from_secs(5),
        )
    }

    fn search_result(id: &str, title: &str, description: &str) -> VideoSearchResult {
        VideoSearchResult {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            thumbnail_url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
            published_at: None,
            channel_title: "Channel".to_string(),
            watch_url: format!("https://www.youtube.com/watch?v={}", id),
        }
    }

    fn fetcher(search: MockVideoSearchProvider) -> RecommendationFetcher {
        RecommendationFetcher::new(Some(Arc::new(search)), executor()).with_seed(5)
    }

    fn mock_search() -> MockVideoSearchProvider {
        let mut search = MockVideoSearchProvider::new();
        search.expect_name().return_const("mock_search");
        search
    }

    #[tokio::test]
    async fn test_external_results_are_categorized() {
        let mut search = mock_search();
        search
            .expect_search_videos()
            .withf(|query| query.max_results == 2 && query.phrase.ends_with(SEARCH_QUALIFIER))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    search_result("a1", "Docker for beginners", "containers and kubernetes"),
                    search_result("b2", "CSS grid", "responsive web layouts"),
                    search_result("c3", "Extra", "not requested"),
                ])
            });

        let items = fetcher(search)
            .fetch(&UserInterestProfile::default(), 2)
            .await;

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.origin == Origin::External));
        assert_eq!(items[0].category, "devops");
        assert_eq!(items[1].category, "web");
        assert_eq!(items[0].source_url, "https://www.youtube.com/watch?v=a1");
    }

    #[tokio::test]
    async fn test_search_failure_serves_truncated_static_list() {
        let mut search = mock_search();
        search
            .expect_search_videos()
            .times(2)
            .returning(|_| Err(RemoteError::Transient("503".to_string())));

        let items = fetcher(search)
            .fetch(&UserInterestProfile::default(), 3)
            .await;

        let expected: Vec<_> = default_static_recommendations().into_iter().take(3).collect();
        assert_eq!(items, expected);
    }

    #[tokio::test]
    async fn test_count_larger_than_static_list() {
        let mut search = mock_search();
        search
            .expect_search_videos()
            .returning(|_| Err(RemoteError::Transient("503".to_string())));

        let items = fetcher(search)
            .fetch(&UserInterestProfile::default(), 20)
            .await;

        assert_eq!(items, default_static_recommendations());
    }

    #[tokio::test]
    async fn test_empty_search_serves_static_list() {
        let mut search = mock_search();
        search.expect_search_videos().times(1).returning(|_| Ok(Vec::new()));

        let items = fetcher(search)
            .fetch(&UserInterestProfile::default(), 4)
            .await;

        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|item| item.origin == Origin::InternalStatic));
    }

    #[tokio::test]
    async fn test_without_provider_serves_static_list() {
        let fetcher = RecommendationFetcher::new(None, executor());
        let items = fetcher.fetch(&UserInterestProfile::default(), 1).await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "ZQL7tL2S0oQ");
    }

    #[tokio::test]
    async fn test_empty_static_list_may_be_empty() {
        let fetcher = RecommendationFetcher::new(None, executor()).with_static_items(Vec::new());
        assert!(fetcher
            .fetch(&UserInterestProfile::default(), 5)
            .await
            .is_empty());
    }

    #[test]
    fn test_search_phrase_uses_at_most_three_interests() {
        let fetcher = RecommendationFetcher::new(None, executor()).with_seed(1);
        let interests: Vec<String> = ["rust", "go", "zig", "elixir", "ocaml"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let phrase = fetcher.search_phrase(&interests);
        let terms: Vec<&str> = phrase
            .trim_end_matches(SEARCH_QUALIFIER)
            .split_whitespace()
            .collect();

        assert_eq!(terms.len(), 3);
        assert!(terms.iter().all(|term| interests.iter().any(|i| i == term)));
        assert!(phrase.ends_with(" tech tutorial"));
    }

    #[test]
    fn test_static_items_link_to_youtube() {
        for item in default_static_recommendations() {
            assert_eq!(
                item.thumbnail_url,
                format!("https://i.ytimg.com/vi/{}/maxresdefault.jpg", item.id)
            );
            assert!(item.source_url.ends_with(&item.id));
            assert_eq!(item.origin, Origin::InternalStatic);
        }
    }
}
