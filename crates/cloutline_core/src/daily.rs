//! crates/cloutline_core/src/daily.rs
//!
//! The featured "hook of the day": one curated hook per calendar day.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::domain::Hook;

const DAILY_HOOKS: &[&str] = &[
    "The secret to viral content? It's not what you think.",
    "Why 99% of creators fail (and how to be the 1%)",
    "This one mindset shift changed everything for me",
    "The algorithm hack nobody talks about",
    "Stop creating content. Start creating conversations.",
    "Your biggest competitor isn't who you think it is",
    "The content strategy that built my 6-figure business",
    "Why authenticity is overrated (controversial take)",
    "The psychology behind viral hooks revealed",
    "This free tool replaced my entire marketing team",
];

pub fn hook_of_the_day(date: NaiveDate) -> Hook {
    let text = DAILY_HOOKS[date.ordinal() as usize % DAILY_HOOKS.len()];
    Hook {
        id: format!("daily-{}", date.format("%Y-%m-%d")),
        text: text.to_string(),
        topic: "Daily Inspiration".to_string(),
        category: "Featured".to_string(),
        created_at: date.and_time(NaiveTime::MIN).and_utc(),
        engagement: 95,
        platform: None,
        style: None,
        audience: None,
        is_ai_generated: None,
    }
}
