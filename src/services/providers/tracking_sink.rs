use crate::{
    error::RemoteError,
    models::InteractionEvent,
    services::providers::{join_url, InteractionSink},
};
use reqwest::Client as HttpClient;

/// Posts interaction events to `{api_url}/interaction`
#[derive(Clone)]
pub struct HttpInteractionSink {
    http_client: HttpClient,
    api_url: String,
}

impl HttpInteractionSink {
    pub fn new(http_client: HttpClient, api_url: String) -> Self {
        Self {
            http_client,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl InteractionSink for HttpInteractionSink {
    async fn record(&self, event: &InteractionEvent) -> Result<(), RemoteError> {
        let url = join_url(&self.api_url, "interaction");
        let response = self.http_client.post(&url).json(event).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::from_status(status, body));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "http_tracking"
    }
}
