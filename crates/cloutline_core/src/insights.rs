//! crates/cloutline_core/src/insights.rs
//!
//! Rule-based usage insights computed from the latest hook batch and the stored stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Hook, UserStats};

const HIGH_ENGAGEMENT_AVERAGE: f64 = 80.0;
const STREAK_THRESHOLD: u32 = 7;
const MIN_COPY_RATE: f64 = 0.3;
const HIGH_USAGE_THRESHOLD: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Suggestion,
    Trend,
    Optimization,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub actionable: bool,
    pub priority: InsightPriority,
    pub created_at: DateTime<Utc>,
}

impl Insight {
    fn new(
        id: &str,
        kind: InsightKind,
        title: &str,
        description: String,
        actionable: bool,
        priority: InsightPriority,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            description,
            actionable,
            priority,
            created_at: now,
        }
    }
}

/// Evaluates every rule in a fixed order. The trending entry is always present.
pub fn insights(stats: &UserStats, hooks: &[Hook], now: DateTime<Utc>) -> Vec<Insight> {
    let mut found = Vec::new();

    if !hooks.is_empty() {
        let average =
            hooks.iter().map(|h| f64::from(h.engagement)).sum::<f64>() / hooks.len() as f64;
        if average > HIGH_ENGAGEMENT_AVERAGE {
            found.push(Insight::new(
                "performance",
                InsightKind::Suggestion,
                "High Performance Detected",
                format!(
                    "Your hooks are performing exceptionally well with {:.1}% average engagement. Consider creating similar content.",
                    average
                ),
                true,
                InsightPriority::High,
                now,
            ));
        }
    }

    if stats.streak > STREAK_THRESHOLD {
        found.push(Insight::new(
            "streak",
            InsightKind::Trend,
            "Consistency Streak",
            format!(
                "You've been consistently active for {} days. This consistency is key to building audience engagement.",
                stats.streak
            ),
            false,
            InsightPriority::Medium,
            now,
        ));
    }

    if (stats.total_copied as f64) < stats.total_generated as f64 * MIN_COPY_RATE {
        found.push(Insight::new(
            "copy-rate",
            InsightKind::Optimization,
            "Low Copy Rate",
            "You're copying fewer hooks than average. Try experimenting with different styles to find what resonates with you.".to_string(),
            true,
            InsightPriority::Medium,
            now,
        ));
    }

    found.push(Insight::new(
        "trending",
        InsightKind::Trend,
        "Trending Topics",
        "AI, productivity, and personal branding are trending this week. Consider creating hooks around these topics.".to_string(),
        true,
        InsightPriority::Low,
        now,
    ));

    if stats.total_generated > HIGH_USAGE_THRESHOLD {
        found.push(Insight::new(
            "high-usage",
            InsightKind::Warning,
            "High Usage Detected",
            "You've generated a lot of hooks recently. Remember to focus on quality over quantity for better engagement.".to_string(),
            true,
            InsightPriority::Medium,
            now,
        ));
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook(engagement: u32) -> Hook {
        Hook {
            id: format!("hook-{}", engagement),
            text: "A hook about sleep".into(),
            topic: "sleep".into(),
            category: "General".into(),
            created_at: Utc::now(),
            engagement,
            platform: None,
            style: None,
            audience: None,
            is_ai_generated: None,
        }
    }

    fn ids(found: &[Insight]) -> Vec<&str> {
        found.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn fresh_user_only_sees_trending() {
        let now = Utc::now();
        let found = insights(&UserStats::fresh(now), &[], now);
        assert_eq!(ids(&found), vec!["trending"]);
        assert_eq!(found[0].priority, InsightPriority::Low);
    }

    #[test]
    fn performance_needs_an_average_above_eighty() {
        let now = Utc::now();
        let stats = UserStats::fresh(now);

        let at_threshold = insights(&stats, &[hook(80), hook(80)], now);
        assert!(!ids(&at_threshold).contains(&"performance"));

        let above = insights(&stats, &[hook(80), hook(81)], now);
        assert_eq!(ids(&above)[0], "performance");
        assert!(above[0].description.contains("80.5%"));
    }

    #[test]
    fn streak_needs_more_than_seven_days() {
        let now = Utc::now();
        let mut stats = UserStats::fresh(now);
        stats.streak = 7;
        assert!(!ids(&insights(&stats, &[], now)).contains(&"streak"));

        stats.streak = 8;
        let found = insights(&stats, &[], now);
        assert!(ids(&found).contains(&"streak"));
        assert!(!found[0].actionable);
    }

    #[test]
    fn copy_rate_is_low_below_thirty_percent() {
        let now = Utc::now();
        let mut stats = UserStats::fresh(now);
        stats.total_generated = 10;
        stats.total_copied = 3;
        assert!(!ids(&insights(&stats, &[], now)).contains(&"copy-rate"));

        stats.total_copied = 2;
        assert!(ids(&insights(&stats, &[], now)).contains(&"copy-rate"));
    }

    #[test]
    fn high_usage_warns_past_one_hundred() {
        let now = Utc::now();
        let mut stats = UserStats::fresh(now);
        stats.total_copied = 100;
        stats.total_generated = 100;
        assert!(!ids(&insights(&stats, &[], now)).contains(&"high-usage"));

        stats.total_generated = 101;
        let found = insights(&stats, &[], now);
        assert_eq!(ids(&found).last(), Some(&"high-usage"));
        assert_eq!(found.last().unwrap().kind, InsightKind::Warning);
    }

    #[test]
    fn kind_serializes_as_type() {
        let now = Utc::now();
        let json = serde_json::to_value(&insights(&UserStats::fresh(now), &[], now)[0]).unwrap();
        assert_eq!(json["type"], "trend");
        assert_eq!(json["priority"], "low");
        assert!(json.get("createdAt").is_some());
    }
}
