pub mod classification;
pub mod heuristics;
pub mod interests;
pub mod providers;
pub mod recommendations;
pub mod retry;
pub mod sampler;
pub mod tracking;

pub use classification::ClassificationGateway;
pub use recommendations::RecommendationFetcher;
pub use retry::{RetryExecutor, RetryPolicy};
pub use sampler::SamplingConfig;
pub use tracking::{InteractionTracker, TrackerHandle};
