use serde::{Deserialize, Serialize};

/// Read-only view of a user record used to seed recommendation queries
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInterestProfile {
    /// Interests the user picked explicitly
    #[serde(default)]
    pub explicit_interests: Vec<String>,
    /// Skill tags listed on the profile
    #[serde(default)]
    pub skill_tags: Vec<String>,
    /// Free-text bio, scanned for tech keywords when nothing explicit is set
    #[serde(default)]
    pub bio: String,
}

impl UserInterestProfile {
    pub fn with_bio(bio: impl Into<String>) -> Self {
        Self {
            bio: bio.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_partial_input() {
        let profile: UserInterestProfile =
            serde_json::from_str(r#"{"skillTags": ["rust", "sql"]}"#).unwrap();
        assert!(profile.explicit_interests.is_empty());
        assert_eq!(profile.skill_tags, vec!["rust", "sql"]);
        assert_eq!(profile.bio, "");
    }
}
