//! crates/cloutline_core/src/synthesizer.rs
//!
//! Offline hook generation by substituting the topic into canned templates.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::domain::BATCH_SIZE;

const TOPIC_PLACEHOLDER: &str = "{topic}";

const HOOK_TEMPLATES: &[&str] = &[
    // Question
    "What if I told you {topic} could change your life in 30 days?",
    "Why do 90% of people fail at {topic}? (The answer will shock you)",
    "What's the #1 mistake people make with {topic}?",
    "How did I master {topic} in just 7 days?",
    "What would happen if you ignored {topic} for a year?",
    // Authority
    "I've spent 10 years studying {topic} - here's what I learned",
    "The {topic} secret that millionaires don't want you to know",
    "I generated $100k using this {topic} strategy",
    "This {topic} hack saved me 20 hours a week",
    "The {topic} method that changed everything for me",
    // Curiosity
    "The shocking truth about {topic} that nobody talks about",
    "You've been doing {topic} wrong your entire life",
    "The {topic} industry doesn't want you to see this",
    "This {topic} discovery will blow your mind",
    "The hidden side of {topic} they don't teach in school",
    // Story
    "My {topic} journey from zero to hero in 6 months",
    "How {topic} completely transformed my business",
    "The day {topic} saved my career (true story)",
    "From failing at {topic} to becoming an expert",
    "Why I almost quit {topic} (and what changed my mind)",
    // List
    "5 {topic} mistakes that are costing you money",
    "The top 3 {topic} trends everyone's talking about",
    "7 {topic} strategies that actually work in 2025",
    "10 {topic} tools that will save you hours",
    "3 {topic} secrets I wish I knew sooner",
    // Controversial
    "{topic} is dead - here's what's replacing it",
    "Why everyone's wrong about {topic}",
    "The {topic} myth that's holding you back",
    "Unpopular opinion: {topic} is overrated",
    "Why I stopped following {topic} advice",
    // Before/after
    "Before vs After: My {topic} transformation",
    "How {topic} took me from broke to successful",
    "Life before {topic} vs life after {topic}",
    "The {topic} glow-up nobody saw coming",
    "From {topic} beginner to expert in record time",
    // Urgency
    "{topic} is changing fast - don't get left behind",
    "Why you need to start {topic} today (not tomorrow)",
    "The {topic} opportunity that won't last forever",
    "Last chance to master {topic} before it's too late",
    "Time-sensitive {topic} strategy (act now)",
    // Problem/solution
    "Struggling with {topic}? Here's your solution",
    "The {topic} problem everyone ignores (and how to fix it)",
    "How to overcome the biggest {topic} challenge",
    "The simple {topic} fix that changes everything",
    "Why {topic} fails (and how to make it work)",
    // Statistic
    "97% of people don't know this {topic} fact",
    "The {topic} statistic that will surprise you",
    "I analyzed 1000 {topic} cases - here's what I found",
    "The {topic} numbers that don't add up",
    "Why {topic} statistics lie (and what's really true)",
];

const ENGAGEMENT_BOOST_WORDS: &[&str] = &[
    "secret",
    "shocking",
    "hidden",
    "exposed",
    "revealed",
    "truth",
    "mistake",
    "hack",
    "trick",
    "method",
    "strategy",
    "system",
    "blueprint",
    "formula",
    "game-changer",
    "life-changing",
    "revolutionary",
    "breakthrough",
    "discovery",
];

const QUESTION_VARIANTS: &[&str] = &[
    "Ever wondered why {topic} experts never share this?",
    "What if {topic} could solve your biggest problem?",
    "Why does everyone get {topic} wrong?",
    "How is {topic} changing everything in 2025?",
    "What's the real secret behind {topic} success?",
];

const NUMBER_VARIANTS: &[&str] = &[
    "{n} {topic} hacks that actually work",
    "{n} reasons why {topic} is essential in 2025",
    "{n} {topic} mistakes costing you success",
    "The top {n} {topic} strategies revealed",
    "{n} {topic} secrets everyone should know",
];

const NUMBER_CHOICES: &[u32] = &[3, 5, 7, 10];

const STORY_VARIANTS: &[&str] = &[
    "My {topic} transformation (before vs after)",
    "How {topic} saved my business",
    "From {topic} failure to success story",
    "The {topic} journey nobody talks about",
    "Why I almost gave up on {topic}",
];

/// Chance that a templated hook gets a boost word spliced in.
const BOOST_PROBABILITY: f64 = 0.3;

/// Produces hook texts from the template bank.
///
/// Output order is random unless the synthesizer was built with [`TemplateSynthesizer::with_seed`].
pub struct TemplateSynthesizer {
    rng: Mutex<StdRng>,
}

impl Default for TemplateSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSynthesizer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Returns five hook texts, each containing `topic` verbatim.
    pub fn synthesize(&self, topic: &str) -> Vec<String> {
        // A poisoned lock only means another caller panicked mid-draw; the rng is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let mut templates = HOOK_TEMPLATES.to_vec();
        templates.shuffle(&mut *rng);

        templates
            .into_iter()
            .take(BATCH_SIZE)
            .enumerate()
            .map(|(index, template)| {
                let mut text = fill(template, topic);
                if rng.gen_bool(BOOST_PROBABILITY) {
                    text = boost(&text, topic, &mut *rng);
                }
                match index {
                    0 => question_variant(topic, &mut *rng),
                    1 => number_variant(topic, &mut *rng),
                    2 => story_variant(topic, &mut *rng),
                    _ => text,
                }
            })
            .collect()
    }
}

fn fill(template: &str, topic: &str) -> String {
    template.replace(TOPIC_PLACEHOLDER, topic)
}

/// Splices a boost word in front of the first occurrence of the topic,
/// unless the hook already uses that word.
fn boost(text: &str, topic: &str, rng: &mut StdRng) -> String {
    let Some(word) = ENGAGEMENT_BOOST_WORDS.choose(rng) else {
        return text.to_string();
    };
    if text.to_lowercase().contains(word) {
        return text.to_string();
    }
    text.replacen(topic, &format!("{} {}", word, topic), 1)
}

fn question_variant(topic: &str, rng: &mut StdRng) -> String {
    let template = QUESTION_VARIANTS.choose(rng).unwrap_or(&QUESTION_VARIANTS[0]);
    fill(template, topic)
}

fn number_variant(topic: &str, rng: &mut StdRng) -> String {
    let n = NUMBER_CHOICES.choose(rng).copied().unwrap_or(5);
    let template = NUMBER_VARIANTS.choose(rng).unwrap_or(&NUMBER_VARIANTS[0]);
    fill(&template.replace("{n}", &n.to_string()), topic)
}

fn story_variant(topic: &str, rng: &mut StdRng) -> String {
    let template = STORY_VARIANTS.choose(rng).unwrap_or(&STORY_VARIANTS[0]);
    fill(template, topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_a_placeholder() {
        assert_eq!(HOOK_TEMPLATES.len(), 50);
        for template in HOOK_TEMPLATES
            .iter()
            .chain(QUESTION_VARIANTS)
            .chain(NUMBER_VARIANTS)
            .chain(STORY_VARIANTS)
        {
            assert!(template.contains(TOPIC_PLACEHOLDER), "{}", template);
        }
    }

    #[test]
    fn returns_five_hooks_containing_the_topic() {
        let synthesizer = TemplateSynthesizer::new();
        for topic in ["fitness", "Remote Work", "a", "crypto & NFTs"] {
            for _ in 0..50 {
                let hooks = synthesizer.synthesize(topic);
                assert_eq!(hooks.len(), 5);
                for hook in &hooks {
                    assert!(!hook.is_empty());
                    assert!(hook.contains(topic), "{:?} missing in {:?}", topic, hook);
                    assert!(!hook.contains('{'), "unfilled placeholder in {:?}", hook);
                }
            }
        }
    }

    #[test]
    fn placeholder_text_inside_the_topic_survives() {
        for topic in ["{n} habits", "{topic} ideas"] {
            for seed in 0..20 {
                let hooks = TemplateSynthesizer::with_seed(seed).synthesize(topic);
                for hook in &hooks {
                    assert!(hook.contains(topic), "seed {}: {:?} missing in {:?}", seed, topic, hook);
                }
            }
        }
    }

    #[test]
    fn first_three_positions_use_the_variant_generators() {
        let synthesizer = TemplateSynthesizer::with_seed(7);
        let hooks = synthesizer.synthesize("sleep");

        assert!(QUESTION_VARIANTS
            .iter()
            .any(|t| fill(t, "sleep") == hooks[0]));
        assert!(NUMBER_VARIANTS.iter().any(|t| {
            NUMBER_CHOICES
                .iter()
                .any(|n| fill(&t.replace("{n}", &n.to_string()), "sleep") == hooks[1])
        }));
        assert!(STORY_VARIANTS.iter().any(|t| fill(t, "sleep") == hooks[2]));
    }

    #[test]
    fn same_seed_gives_same_batch() {
        let a = TemplateSynthesizer::with_seed(42).synthesize("coffee");
        let b = TemplateSynthesizer::with_seed(42).synthesize("coffee");
        assert_eq!(a, b);
    }

    #[test]
    fn boost_skips_words_already_present() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let text = "The secret shocking hidden exposed revealed truth mistake hack trick \
                        method strategy system blueprint formula game-changer life-changing \
                        revolutionary breakthrough discovery of yoga";
            assert_eq!(boost(text, "yoga", &mut rng), text);
        }
    }

    #[test]
    fn boost_splices_before_first_topic_occurrence() {
        let mut rng = StdRng::seed_from_u64(3);
        let boosted = boost("Life before yoga vs life after yoga", "yoga", &mut rng);
        let word = boosted
            .strip_prefix("Life before ")
            .and_then(|rest| rest.strip_suffix(" yoga vs life after yoga"))
            .expect("boost word spliced before the first occurrence");
        assert!(ENGAGEMENT_BOOST_WORDS.contains(&word));
    }
}
