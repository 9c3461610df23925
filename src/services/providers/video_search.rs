/// YouTube Data API search provider
///
/// API Flow:
/// 1. Search: /search?part=snippet&type=video&q=... → video ids and snippets
///
/// Medium-length videos ordered by relevance are requested, which keeps
/// shorts and hour-long streams out of the tutorial feed.
use crate::{
    error::RemoteError,
    models::{SearchListResponse, VideoSearchQuery, VideoSearchResult},
    services::providers::{join_url, VideoSearchProvider},
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct YouTubeSearchProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl YouTubeSearchProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl VideoSearchProvider for YouTubeSearchProvider {
    async fn search_videos(
        &self,
        query: &VideoSearchQuery,
    ) -> Result<Vec<VideoSearchResult>, RemoteError> {
        let url = join_url(&self.api_url, "search");
        let max_results = query.max_results.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query.phrase.as_str()),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("order", "relevance"),
                ("videoDuration", "medium"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::from_status(status, body));
        }

        let search: SearchListResponse = response.json().await?;
        let results: Vec<VideoSearchResult> = search
            .items
            .into_iter()
            .filter_map(|item| item.into_result())
            .collect();

        tracing::info!(
            query = %query.phrase,
            results = results.len(),
            provider = "youtube",
            "Video search completed"
        );

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
