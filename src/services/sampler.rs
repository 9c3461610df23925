/// Bounded-cost text sampling for long transcripts
///
/// Long texts are cut into sentence-like units and a handful of random runs of
/// consecutive sentences are stitched together, so the classifier sees material
/// from across the whole text instead of always the same prefix. Output is not
/// repeatable unless the caller supplies a seeded generator.
use rand::Rng;

/// Token placed between sampled portions
pub const PORTION_SEPARATOR: &str = " [...] ";

/// Marker appended when the sampler falls back to truncation
pub const TRUNCATION_MARKER: &str = "...";

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Thresholds controlling how much text is sent to the classifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Texts at or below this many characters are returned unchanged
    pub max_length: usize,
    /// Number of portions to take
    pub desired_portions: usize,
    /// Characters after which a portion stops growing
    pub portion_length: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_length: 1000,
            desired_portions: 3,
            portion_length: 300,
        }
    }
}

impl SamplingConfig {
    /// Same thresholds with a different portion count
    pub fn with_portions(self, desired_portions: usize) -> Self {
        Self {
            desired_portions,
            ..self
        }
    }

    pub fn exceeds(&self, text: &str) -> bool {
        text.chars().count() > self.max_length
    }
}

/// Samples `body` according to `config`
pub fn sample_text<R: Rng + ?Sized>(body: &str, config: &SamplingConfig, rng: &mut R) -> String {
    if !config.exceeds(body) {
        return body.to_string();
    }

    let sentences = split_sentences(body);
    if sentences.len() <= config.desired_portions {
        return body.to_string();
    }

    match pick_portions(&sentences, config, rng) {
        Some(sample) => sample,
        None => {
            tracing::debug!(
                length = body.len(),
                desired_portions = config.desired_portions,
                portion_length = config.portion_length,
                "Sampling failed, truncating instead"
            );
            truncate(body, config.max_length)
        }
    }
}

/// Splits on `.`, `!` and `?`, keeping the terminator and dropping empty fragments
fn split_sentences(text: &str) -> Vec<&str> {
    text.split_inclusive(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|fragment| {
            !fragment
                .trim_end_matches(SENTENCE_TERMINATORS)
                .trim()
                .is_empty()
        })
        .collect()
}

fn pick_portions<R: Rng + ?Sized>(
    sentences: &[&str],
    config: &SamplingConfig,
    rng: &mut R,
) -> Option<String> {
    if sentences.is_empty() || config.desired_portions == 0 || config.portion_length == 0 {
        return None;
    }

    let mut portions = Vec::with_capacity(config.desired_portions);
    for _ in 0..config.desired_portions {
        let start = rng.gen_range(0..sentences.len());
        let mut portion = String::new();

        for sentence in &sentences[start..] {
            if portion.chars().count() >= config.portion_length {
                break;
            }
            if !portion.is_empty() {
                portion.push(' ');
            }
            portion.push_str(sentence);
        }

        portions.push(portion);
    }

    Some(portions.join(PORTION_SEPARATOR))
}

fn truncate(body: &str, max_length: usize) -> String {
    let mut truncated: String = body.chars().take(max_length).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
