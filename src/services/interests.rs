use crate::{models::UserInterestProfile, services::heuristics::TECH_KEYWORDS};

/// Interests used when a profile yields nothing usable
pub const DEFAULT_INTERESTS: [&str; 3] = ["tech tutorials", "programming", "software development"];

/// Derives the ranked, de-duplicated interest keywords for a profile
///
/// The first non-empty source wins: explicit interests, then skill tags, then
/// tech keywords found in the bio, then [`DEFAULT_INTERESTS`].
pub fn extract(profile: &UserInterestProfile) -> Vec<String> {
    let explicit = dedup(profile.explicit_interests.iter().map(String::as_str));
    if !explicit.is_empty() {
        return explicit;
    }

    let skills = dedup(profile.skill_tags.iter().map(String::as_str));
    if !skills.is_empty() {
        return skills;
    }

    let from_bio = bio_keywords(&profile.bio);
    if !from_bio.is_empty() {
        return from_bio;
    }

    DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()
}

/// Tech keywords appearing as whole words in a free-text bio
fn bio_keywords(bio: &str) -> Vec<String> {
    // Pad with spaces so keywords only match on word boundaries ("api" must not hit "rapid")
    let normalized: String = bio
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '/' | '+' | '#') {
                c
            } else {
                ' '
            }
        })
        .collect();
    let padded = format!(" {} ", normalized.split_whitespace().collect::<Vec<_>>().join(" "));

    dedup(
        TECH_KEYWORDS
            .iter()
            .copied()
            .filter(|keyword| padded.contains(&format!(" {} ", keyword))),
    )
}

/// Trims, drops blanks and removes case-insensitive duplicates, keeping first occurrences
fn dedup<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(value.to_lowercase()))
        .map(str::to_string)
        .collect()
}
