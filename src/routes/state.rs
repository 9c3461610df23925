use std::sync::Arc;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    services::{
        providers::{
            HttpClassifierProvider, HttpInteractionSink, VideoSearchProvider,
            YouTubeSearchProvider,
        },
        ClassificationGateway, InteractionTracker, RecommendationFetcher, RetryExecutor,
        TrackerHandle,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ClassificationGateway>,
    pub fetcher: Arc<RecommendationFetcher>,
    pub tracker: InteractionTracker,
}

impl AppState {
    pub fn new(
        gateway: ClassificationGateway,
        fetcher: RecommendationFetcher,
        tracker: InteractionTracker,
    ) -> Self {
        Self {
            gateway: Arc::new(gateway),
            fetcher: Arc::new(fetcher),
            tracker,
        }
    }

    /// Wires the pipeline against the HTTP collaborators named in `config`
    ///
    /// Must be called inside a tokio runtime; the tracking workers are spawned here.
    pub fn from_config(config: &Config) -> anyhow::Result<(Self, TrackerHandle)> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;
        let executor = RetryExecutor::new(config.retry_policy(), config.request_timeout());

        let classifier = HttpClassifierProvider::new(
            http_client.clone(),
            config.classifier_api_url.clone(),
            config.tech_classifier_path.clone(),
            config.domain_classifier_path.clone(),
        );
        let gateway = ClassificationGateway::new(
            Arc::new(classifier),
            executor.clone(),
            config.sampling(),
            config.domain_sample_portions,
        );

        let search = match &config.search_api_key {
            Some(key) if !key.trim().is_empty() => {
                let provider: Arc<dyn VideoSearchProvider> = Arc::new(YouTubeSearchProvider::new(
                    http_client.clone(),
                    key.clone(),
                    config.search_api_url.clone(),
                ));
                Some(provider)
            }
            _ => {
                tracing::warn!("SEARCH_API_KEY not set, recommendations will use the static list");
                None
            }
        };
        let fetcher = RecommendationFetcher::new(search, executor.clone());

        let sink = HttpInteractionSink::new(http_client, config.tracking_api_url.clone());
        let (tracker, handle) = InteractionTracker::spawn(
            Arc::new(sink),
            executor,
            config.tracking_workers,
            config.tracking_queue_capacity,
        );

        Ok((Self::new(gateway, fetcher, tracker), handle))
    }
}
