//! crates/cloutline_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! These are plain values; the wire and storage format is camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Smallest `max_length` a caller may request.
pub const MIN_MAX_LENGTH: u32 = 100;
/// Largest `max_length` a caller may request.
pub const MAX_MAX_LENGTH: u32 = 500;
/// Number of hooks in every generation batch.
pub const BATCH_SIZE: usize = 5;

/// A generated candidate headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    pub id: String,
    pub text: String,
    pub topic: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub engagement: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
    #[serde(default, rename = "isAIGenerated", skip_serializing_if = "Option::is_none")]
    pub is_ai_generated: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Viral,
    Professional,
    Casual,
    Controversial,
    Educational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Linkedin,
    Instagram,
    Tiktok,
    Youtube,
    #[default]
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    General,
    Business,
    Creators,
    Students,
    Entrepreneurs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Friendly,
    Authoritative,
    Humorous,
    Inspiring,
    Urgent,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Viral => "viral",
            Style::Professional => "professional",
            Style::Casual => "casual",
            Style::Controversial => "controversial",
            Style::Educational => "educational",
        }
    }
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
            Platform::General => "general",
        }
    }
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::General => "general",
            Audience::Business => "business",
            Audience::Creators => "creators",
            Audience::Students => "students",
            Audience::Entrepreneurs => "entrepreneurs",
        }
    }
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Friendly => "friendly",
            Tone::Authoritative => "authoritative",
            Tone::Humorous => "humorous",
            Tone::Inspiring => "inspiring",
            Tone::Urgent => "urgent",
        }
    }
}

/// User-selected generation options. Read-only input to the generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    pub style: Style,
    pub platform: Platform,
    pub audience: Audience,
    pub tone: Tone,
    #[serde(rename = "useRemoteAPI")]
    pub use_remote_api: bool,
    pub include_emojis: bool,
    pub include_hashtags: bool,
    pub max_length: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            style: Style::default(),
            platform: Platform::default(),
            audience: Audience::default(),
            tone: Tone::default(),
            use_remote_api: false,
            include_emojis: true,
            include_hashtags: false,
            max_length: 280,
        }
    }
}

impl GenerationSettings {
    /// Checks the values the type system cannot enforce.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(MIN_MAX_LENGTH..=MAX_MAX_LENGTH).contains(&self.max_length) {
            return Err(GenerationError::Validation(format!(
                "maxLength must be between {} and {}, got {}",
                MIN_MAX_LENGTH, MAX_MAX_LENGTH, self.max_length
            )));
        }
        Ok(())
    }
}

/// Aggregate usage counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_generated: u64,
    pub total_copied: u64,
    pub total_shared: u64,
    pub favorites_count: u64,
    pub streak: u32,
    pub last_visit: DateTime<Utc>,
}

impl UserStats {
    /// Zeroed counters with `last_visit` set to `now`.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            total_generated: 0,
            total_copied: 0,
            total_shared: 0,
            favorites_count: 0,
            streak: 0,
            last_visit: now,
        }
    }
}

/// One recorded generation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationHistory {
    pub id: String,
    pub topic: String,
    pub hooks: Vec<Hook>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<GenerationSettings>,
}

/// The user actions that feed `UserStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Generate,
    Copy,
    Share,
    Favorite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_use_camel_case_and_fill_defaults() {
        let settings: GenerationSettings =
            serde_json::from_str(r#"{"style":"casual","useRemoteAPI":true,"maxLength":150}"#)
                .unwrap();

        assert_eq!(settings.style, Style::Casual);
        assert!(settings.use_remote_api);
        assert_eq!(settings.max_length, 150);
        assert_eq!(settings.platform, Platform::General);
        assert!(settings.include_emojis);
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let result: Result<GenerationSettings, _> =
            serde_json::from_str(r#"{"platform":"myspace"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn max_length_bounds_are_enforced() {
        let mut settings = GenerationSettings::default();
        assert!(settings.validate().is_ok());

        settings.max_length = 50;
        assert!(matches!(settings.validate(), Err(GenerationError::Validation(_))));

        settings.max_length = 500;
        assert!(settings.validate().is_ok());

        settings.max_length = 501;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn ai_flag_serializes_as_is_ai_generated() {
        let hook = Hook {
            id: "ai-hook-1".into(),
            text: "Some text here".into(),
            topic: "ai".into(),
            category: "Technology".into(),
            created_at: Utc::now(),
            engagement: 90,
            platform: Some(Platform::Twitter),
            style: None,
            audience: None,
            is_ai_generated: Some(true),
        };
        let json = serde_json::to_value(&hook).unwrap();
        assert_eq!(json["isAIGenerated"], true);
        assert_eq!(json["platform"], "twitter");
        assert!(json.get("style").is_none());
    }
}
