/// HTTP client for the tech/domain classifier service
///
/// Both endpoints take the same `{title, description, content}` body. The tech
/// endpoint answers with `{"result": ...}` and the domain endpoint with
/// `{"domain": ...}`; bare strings are accepted from either.
use crate::{
    error::RemoteError,
    models::{ClassifierRequest, ParsedClassifierResponse},
    services::providers::{join_url, ContentClassifier},
};
use reqwest::Client as HttpClient;

const TECH_RESULT_FIELD: &str = "result";
const DOMAIN_RESULT_FIELD: &str = "domain";

#[derive(Clone)]
pub struct HttpClassifierProvider {
    http_client: HttpClient,
    api_url: String,
    tech_path: String,
    domain_path: String,
}

impl HttpClassifierProvider {
    pub fn new(
        http_client: HttpClient,
        api_url: String,
        tech_path: String,
        domain_path: String,
    ) -> Self {
        Self {
            http_client,
            api_url,
            tech_path,
            domain_path,
        }
    }

    async fn post(
        &self,
        path: &str,
        field: &str,
        request: &ClassifierRequest,
    ) -> Result<ParsedClassifierResponse, RemoteError> {
        let url = join_url(&self.api_url, path);
        let response = self.http_client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::from_status(status, body));
        }

        let plain_text = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_ascii_lowercase().starts_with("text/plain"))
            .unwrap_or(false);
        let body = response.text().await?;
        let parsed = ParsedClassifierResponse::from_body(&body, field, plain_text);

        tracing::debug!(
            url = %url,
            response = ?parsed,
            provider = "http_classifier",
            "Classifier responded"
        );

        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl ContentClassifier for HttpClassifierProvider {
    async fn predict_tech(
        &self,
        request: &ClassifierRequest,
    ) -> Result<ParsedClassifierResponse, RemoteError> {
        self.post(&self.tech_path, TECH_RESULT_FIELD, request).await
    }

    async fn predict_domain(
        &self,
        request: &ClassifierRequest,
    ) -> Result<ParsedClassifierResponse, RemoteError> {
        self.post(&self.domain_path, DOMAIN_RESULT_FIELD, request)
            .await
    }

    fn name(&self) -> &'static str {
        "http_classifier"
    }
}
