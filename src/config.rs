use serde::Deserialize;
use std::time::Duration;

use crate::services::{retry::RetryPolicy, sampler::SamplingConfig};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the tech/domain classifier service
    #[serde(default = "default_classifier_api_url")]
    pub classifier_api_url: String,

    /// Path of the tech-relatedness endpoint under the classifier base
    #[serde(default = "default_tech_classifier_path")]
    pub tech_classifier_path: String,

    /// Path of the domain endpoint under the classifier base
    #[serde(default = "default_domain_classifier_path")]
    pub domain_classifier_path: String,

    /// Base URL of the external video search service
    #[serde(default = "default_search_api_url")]
    pub search_api_url: String,

    /// Credential for the video search service
    #[serde(default)]
    pub search_api_key: Option<String>,

    /// Base URL of the interaction tracking sink
    #[serde(default = "default_tracking_api_url")]
    pub tracking_api_url: String,

    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,

    #[serde(default = "default_retry_initial_delay_ms")]
    pub retry_initial_delay_ms: u64,

    #[serde(default = "default_retry_backoff_multiplier")]
    pub retry_backoff_multiplier: f64,

    /// Cap on any single backoff delay
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,

    /// Upper bound for a single remote attempt
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Texts longer than this are sampled before classification
    #[serde(default = "default_sample_max_length")]
    pub sample_max_length: usize,

    /// Portions taken for the tech-relatedness pass
    #[serde(default = "default_sample_portions")]
    pub sample_portions: usize,

    /// Portions taken when re-sampling for the domain pass
    #[serde(default = "default_domain_sample_portions")]
    pub domain_sample_portions: usize,

    /// Target length of each sampled portion
    #[serde(default = "default_sample_portion_length")]
    pub sample_portion_length: usize,

    /// Workers delivering tracked interactions
    #[serde(default = "default_tracking_workers")]
    pub tracking_workers: usize,

    /// Pending interactions held before new ones are dropped
    #[serde(default = "default_tracking_queue_capacity")]
    pub tracking_queue_capacity: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_classifier_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tech_classifier_path() -> String {
    "predict_tech".to_string()
}

fn default_domain_classifier_path() -> String {
    "predict_domain".to_string()
}

fn default_search_api_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_tracking_api_url() -> String {
    "http://localhost:8000/api/ml/user".to_string()
}

fn default_retry_max_attempts() -> u32 {
    3
}

fn default_retry_initial_delay_ms() -> u64 {
    1000
}

fn default_retry_backoff_multiplier() -> f64 {
    1.5
}

fn default_retry_max_delay_ms() -> u64 {
    30_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_sample_max_length() -> usize {
    1000
}

fn default_sample_portions() -> usize {
    3
}

fn default_domain_sample_portions() -> usize {
    5
}

fn default_sample_portion_length() -> usize {
    300
}

fn default_tracking_workers() -> usize {
    4
}

fn default_tracking_queue_capacity() -> usize {
    256
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            initial_delay: Duration::from_millis(self.retry_initial_delay_ms),
            backoff_multiplier: self.retry_backoff_multiplier,
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Sampling thresholds for the tech-relatedness pass
    pub fn sampling(&self) -> SamplingConfig {
        SamplingConfig {
            max_length: self.sample_max_length,
            desired_portions: self.sample_portions,
            portion_length: self.sample_portion_length,
        }
    }
}
