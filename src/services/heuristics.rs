/// Keyword-based fallback classifier
///
/// Only used once the remote classifier has exhausted its retries. Matching is
/// case-insensitive substring matching, so results are deterministic for a
/// given text.
use crate::models::GENERAL_CATEGORY;

/// Keywords that mark a text as tech-related
pub const TECH_KEYWORDS: &[&str] = &[
    "programming",
    "code",
    "software",
    "developer",
    "tech",
    "technology",
    "javascript",
    "typescript",
    "python",
    "java",
    "react",
    "angular",
    "api",
    "database",
    "web",
    "app",
    "mobile",
    "algorithm",
    "development",
    "machine learning",
    "deep learning",
    "neural network",
    "data science",
    "sql",
    "linux",
    "cloud",
    "aws",
    "azure",
    "devops",
    "docker",
    "kubernetes",
    "ci/cd",
    "cybersecurity",
    "blockchain",
];

/// Domain labels and their keywords, in tie-break order
pub const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "web",
        &["javascript", "html", "css", "web", "frontend", "react", "angular", "vue"],
    ),
    (
        "mobile",
        &["android", "ios", "flutter", "react native", "mobile", "app"],
    ),
    (
        "data_science",
        &["data", "machine learning", "ml", "analytics", "visualization", "statistics"],
    ),
    (
        "backend",
        &["server", "api", "database", "sql", "nosql", "node", "express", "django"],
    ),
    (
        "devops",
        &["devops", "docker", "kubernetes", "ci/cd", "pipeline", "deployment", "aws", "cloud"],
    ),
    (
        "cybersecurity",
        &["security", "encryption", "firewall", "vulnerability", "hacking"],
    ),
];

/// True if any tech keyword appears in `text`
pub fn classify_tech(text: &str) -> bool {
    let text = text.to_lowercase();
    TECH_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Domain with the most keyword matches in `text`
///
/// Ties go to the domain declared first; no matches yields `"general"`.
pub fn classify_domain(text: &str) -> &'static str {
    let text = text.to_lowercase();
    let mut best = GENERAL_CATEGORY;
    let mut best_matches = 0;

    for &(domain, keywords) in DOMAIN_KEYWORDS {
        let matches = keywords
            .iter()
            .filter(|keyword| text.contains(*keyword))
            .count();
        if matches > best_matches {
            best_matches = matches;
            best = domain;
        }
    }

    best
}

/// Maps a free-form domain label from the remote classifier onto the local label set
///
/// Labels such as "Web Development" or "DevOps" become `web` and `devops`;
/// anything unknown is snake-cased.
pub fn normalize_domain_label(label: &str) -> String {
    let lower = label.trim().to_lowercase();

    let known = if lower.contains("web") || lower.contains("frontend") {
        Some("web")
    } else if lower.contains("mobile") {
        Some("mobile")
    } else if lower.contains("data") || lower.contains("machine learning") {
        Some("data_science")
    } else if lower.contains("backend") || lower.contains("back-end") || lower.contains("back end") {
        Some("backend")
    } else if lower.contains("devops") || lower.contains("cloud") {
        Some("devops")
    } else if lower.contains("security") {
        Some("cybersecurity")
    } else {
        None
    };

    if let Some(label) = known {
        return label.to_string();
    }

    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tech_matches_case_insensitively() {
        assert!(classify_tech("Intro to KUBERNETES"));
        assert!(classify_tech("My Python notebook"));
    }

    #[test]
    fn test_classify_tech_without_keywords() {
        assert!(!classify_tech("A slow Sunday of hiking and photography"));
        assert!(!classify_tech(""));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let text = "Deploying a react frontend with docker on aws";
        let tech = classify_tech(text);
        let domain = classify_domain(text);
        for _ in 0..10 {
            assert_eq!(classify_tech(text), tech);
            assert_eq!(classify_domain(text), domain);
        }
    }

    #[test]
    fn test_classify_domain_devops_only() {
        assert_eq!(classify_domain("devops docker kubernetes"), "devops");
    }

    #[test]
    fn test_classify_domain_without_matches_is_general() {
        assert_eq!(classify_domain("a recipe for sourdough bread"), "general");
    }

    #[test]
    fn test_classify_domain_prefers_highest_count() {
        // backend: server, api, database, sql (4) vs web: web (1)
        let text = "Server api design with a sql database behind a web page";
        assert_eq!(classify_domain(text), "backend");
    }

    #[test]
    fn test_classify_domain_tie_goes_to_first_declared() {
        // web: css (1), cybersecurity: firewall (1)
        assert_eq!(classify_domain("css and firewall"), "web");
    }

    #[test]
    fn test_normalize_known_labels() {
        assert_eq!(normalize_domain_label("Web Development"), "web");
        assert_eq!(normalize_domain_label("Mobile Development"), "mobile");
        assert_eq!(normalize_domain_label("Data Science"), "data_science");
        assert_eq!(normalize_domain_label("Backend Development"), "backend");
        assert_eq!(normalize_domain_label("DevOps"), "devops");
        assert_eq!(normalize_domain_label("Cybersecurity"), "cybersecurity");
    }

    #[test]
    fn test_normalize_unknown_label_is_snake_cased() {
        assert_eq!(normalize_domain_label("Game Dev / Graphics"), "game_dev_graphics");
    }
}
