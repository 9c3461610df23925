/// Remote collaborator abstractions
///
/// Each remote service the pipeline depends on sits behind a trait so the
/// gateway, fetcher and tracker can be exercised without a network. The HTTP
/// implementations perform a single attempt; retries are layered on top by
/// [`crate::services::retry::RetryExecutor`].
use crate::{
    error::RemoteError,
    models::{
        ClassifierRequest, InteractionEvent, ParsedClassifierResponse, VideoSearchQuery,
        VideoSearchResult,
    },
};

pub mod classifier;
pub mod tracking_sink;
pub mod video_search;

pub use classifier::HttpClassifierProvider;
pub use tracking_sink::HttpInteractionSink;
pub use video_search::YouTubeSearchProvider;

/// Tech-relatedness and domain classifier
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContentClassifier: Send + Sync {
    /// Asks whether the content is tech-related
    async fn predict_tech(
        &self,
        request: &ClassifierRequest,
    ) -> Result<ParsedClassifierResponse, RemoteError>;

    /// Asks which technical domain the content belongs to
    async fn predict_domain(
        &self,
        request: &ClassifierRequest,
    ) -> Result<ParsedClassifierResponse, RemoteError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// External video search
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VideoSearchProvider: Send + Sync {
    async fn search_videos(
        &self,
        query: &VideoSearchQuery,
    ) -> Result<Vec<VideoSearchResult>, RemoteError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Destination for interaction events
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InteractionSink: Send + Sync {
    async fn record(&self, event: &InteractionEvent) -> Result<(), RemoteError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Joins a base URL and a path with exactly one slash between them
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
