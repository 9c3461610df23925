use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};

use crate::{
    error::{ClassificationError, RemoteError},
    models::{
        ClassifierRequest, ContentSubmission, ParsedClassifierResponse, VerificationResult,
        GENERAL_CATEGORY,
    },
    services::{
        heuristics,
        providers::ContentClassifier,
        retry::RetryExecutor,
        sampler::{sample_text, SamplingConfig},
    },
};

/// Phrase the tech classifier uses for in-scope content
const TECH_MARKER: &str = "technical-related";
/// Negation that turns a tech verdict around ("Not Technical-related")
const NEGATION_MARKER: &str = "not";
/// Literal label the domain classifier returns when it has no answer
const UNKNOWN_DOMAIN: &str = "Unknown Domain";

/// Two-stage remote classification with keyword fallback
///
/// A submission is sampled, checked for tech-relatedness and, only if tech,
/// assigned a domain. The two remote calls are sequential. Any remote failure
/// degrades to [`heuristics`] so a [`VerificationResult`] is always produced.
pub struct ClassificationGateway {
    classifier: Arc<dyn ContentClassifier>,
    executor: RetryExecutor,
    sampling: SamplingConfig,
    domain_portions: usize,
    rng: Mutex<StdRng>,
}

impl ClassificationGateway {
    pub fn new(
        classifier: Arc<dyn ContentClassifier>,
        executor: RetryExecutor,
        sampling: SamplingConfig,
        domain_portions: usize,
    ) -> Self {
        Self {
            classifier,
            executor,
            sampling,
            domain_portions,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the random source with a seeded one for repeatable sampling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Classifies one submission
    pub async fn verify(&self, submission: &ContentSubmission) -> VerificationResult {
        let text = match select_text(submission) {
            Ok(text) => text,
            Err(ClassificationError::TranscriptMissing(kind)) => {
                warn!(kind = %kind, title = %submission.title, "Transcript missing, skipping classification");
                return VerificationResult::transcript_missing(kind);
            }
        };

        let sampled = if submission.kind.is_video_like() {
            self.sample(text, &self.sampling)
        } else {
            text.to_string()
        };

        let result = match self.check_tech(submission, &sampled).await {
            Ok(true) => self.assign_domain(submission, text, sampled).await,
            Ok(false) => VerificationResult::non_tech(sampled, true),
            Err(e) => {
                warn!(
                    error = %e,
                    provider = self.classifier.name(),
                    "Tech classifier unavailable, using keyword fallback"
                );
                let combined = submission.combined_text();
                if heuristics::classify_tech(&combined) {
                    let category = heuristics::classify_domain(&combined).to_string();
                    VerificationResult::tech(category, sampled, false, true)
                } else {
                    VerificationResult::non_tech(sampled, false)
                }
            }
        };

        info!(
            kind = %submission.kind,
            is_tech_related = result.is_tech_related,
            category = %result.category,
            confidence = result.confidence,
            requires_manual_review = result.requires_manual_review,
            "Content classified"
        );

        result
    }

    async fn check_tech(
        &self,
        submission: &ContentSubmission,
        sampled: &str,
    ) -> Result<bool, RemoteError> {
        let request = ClassifierRequest::new(submission, sampled.to_string());
        let classifier = self.classifier.as_ref();
        let request = &request;

        self.executor
            .execute("predict_tech", || async move {
                normalize_tech(classifier.predict_tech(request).await?)
            })
            .await
    }

    async fn assign_domain(
        &self,
        submission: &ContentSubmission,
        text: &str,
        sampled: String,
    ) -> VerificationResult {
        // Long transcripts get a second, wider sample for the domain pass
        let content = if submission.kind.is_video_like() && self.sampling.exceeds(text) {
            let config = self.sampling.with_portions(self.domain_portions);
            self.sample(text, &config)
        } else {
            sampled.clone()
        };

        let request = ClassifierRequest::new(submission, content);
        let classifier = self.classifier.as_ref();
        let request = &request;

        let domain = self
            .executor
            .execute("predict_domain", || async move {
                normalize_domain(classifier.predict_domain(request).await?)
            })
            .await;

        match domain {
            Ok(category) => VerificationResult::tech(category, sampled, true, false),
            Err(e) => {
                warn!(
                    error = %e,
                    provider = self.classifier.name(),
                    "Domain classifier unavailable, using keyword fallback"
                );
                let category = heuristics::classify_domain(&submission.combined_text());
                VerificationResult::tech(category.to_string(), sampled, false, false)
            }
        }
    }

    fn sample(&self, text: &str, config: &SamplingConfig) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        sample_text(text, config, &mut *rng)
    }
}

/// Text the classifiers should judge: the article body, or the transcript of a video or short
fn select_text(submission: &ContentSubmission) -> Result<&str, ClassificationError> {
    if submission.kind.is_video_like() && submission.body.trim().is_empty() {
        return Err(ClassificationError::TranscriptMissing(submission.kind));
    }
    Ok(&submission.body)
}

fn normalize_tech(response: ParsedClassifierResponse) -> Result<bool, RemoteError> {
    match response {
        ParsedClassifierResponse::Structured(verdict) | ParsedClassifierResponse::Raw(verdict) => {
            let verdict = verdict.to_lowercase();
            Ok(verdict.contains(TECH_MARKER) && !verdict.contains(NEGATION_MARKER))
        }
        ParsedClassifierResponse::Unrecognized => Err(RemoteError::MalformedResponse(
            "tech classifier returned an unrecognized shape".to_string(),
        )),
    }
}

fn normalize_domain(response: ParsedClassifierResponse) -> Result<String, RemoteError> {
    match response {
        ParsedClassifierResponse::Structured(label) | ParsedClassifierResponse::Raw(label) => {
            let label = label.trim();
            if label.is_empty() || label.eq_ignore_ascii_case(UNKNOWN_DOMAIN) {
                return Ok(GENERAL_CATEGORY.to_string());
            }
            Ok(heuristics::normalize_domain_label(label))
        }
        ParsedClassifierResponse::Unrecognized => Err(RemoteError::MalformedResponse(
            "domain classifier returned an unrecognized shape".to_string(),
        )),
    }
}
