//! crates/cloutline_core/src/category.rs
//!
//! Keyword classifier shared by both generation paths.

/// Ordered keyword groups. The first group with a keyword contained in the topic wins.
const CATEGORY_KEYWORDS: &[(&[&str], &str)] = &[
    (&["business", "entrepreneur"], "Business"),
    (&["fitness", "health"], "Health & Fitness"),
    (&["tech", "ai"], "Technology"),
    (&["money", "finance"], "Finance"),
    (&["food", "recipe"], "Food & Cooking"),
    (&["travel"], "Travel"),
    (&["fashion", "style"], "Fashion & Beauty"),
    (&["education", "learning"], "Education"),
    (&["relationship", "dating"], "Relationships"),
];

pub const DEFAULT_CATEGORY: &str = "General";

/// Derives a category label from the topic alone.
///
/// Matching is case-insensitive substring matching, so "Email marketing" lands in
/// Technology through "ai". That mirrors how users have always seen these labels.
pub fn categorize(topic: &str) -> &'static str {
    let lowered = topic.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_CATEGORY)
}
