//! services/api/src/adapters/groq_llm.rs
//!
//! This module contains the adapter for the remote hook-writing LLM.
//! It implements the `HookGenerationService` port from the `core` crate against an
//! OpenAI-compatible chat-completions endpoint (Groq by default).

use async_trait::async_trait;
use cloutline_core::domain::{GenerationSettings, Platform, Style, BATCH_SIZE};
use cloutline_core::ports::HookGenerationService;
use cloutline_core::{GenerationError, RemoteErrorKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::config::Config;

const MIN_TOPIC_CHARS: usize = 2;
const MIN_HOOK_CHARS: usize = 10;
const MAX_HOOK_CHARS: usize = 500;

static NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]?\s*").expect("numbering pattern is valid"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*]\s*").expect("bullet pattern is valid"));

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `HookGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct GroqHookAdapter {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl GroqHookAdapter {
    /// Creates a new `GroqHookAdapter`. The client should carry the request timeout.
    pub fn new(
        http: reqwest::Client,
        api_key: Option<String>,
        base_url: String,
        model: String,
        max_tokens: u32,
    ) -> Self {
        Self {
            http,
            api_key,
            base_url,
            model,
            max_tokens,
        }
    }

    /// Builds the adapter and its HTTP client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.groq_timeout)
            .build()?;
        Ok(Self::new(
            http,
            config.groq_api_key.clone(),
            config.groq_base_url.clone(),
            config.groq_model.clone(),
            config.groq_max_tokens,
        ))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn request_completion(
        &self,
        api_key: &str,
        system: &str,
        user: &str,
    ) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: Some(0.9),
            max_tokens: self.max_tokens,
            top_p: Some(0.95),
            frequency_penalty: Some(0.3),
            presence_penalty: Some(0.2),
            stream: false,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::remote(
                RemoteErrorKind::Unknown,
                format!("Malformed completion response: {}", e),
            )
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| {
                GenerationError::EmptyResponse(
                    "No response generated. Please try again.".to_string(),
                )
            })?;

        if content.trim().is_empty() {
            return Err(GenerationError::EmptyResponse(
                "Empty response received. Please try again.".to_string(),
            ));
        }
        Ok(content)
    }
}

//=========================================================================================
// `HookGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl HookGenerationService for GroqHookAdapter {
    /// Asks the model for five hooks and normalizes its free-text answer.
    async fn generate_hooks(
        &self,
        topic: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<String>, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerationError::Configuration(
                "Groq API key is required. Set GROQ_API_KEY to enable AI generation.".to_string(),
            )
        })?;

        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GenerationError::Validation(
                "Topic is required for hook generation".to_string(),
            ));
        }
        if topic.chars().count() < MIN_TOPIC_CHARS {
            return Err(GenerationError::Validation(format!(
                "Topic must be at least {} characters long",
                MIN_TOPIC_CHARS
            )));
        }

        let system = system_prompt(settings);
        let user = user_prompt(topic, settings);
        debug!(model = %self.model, topic, "requesting hooks from completion API");

        let content = self.request_completion(api_key, &system, &user).await?;
        let hooks = parse_hooks(&content);
        if hooks.is_empty() {
            warn!(topic, "completion contained no usable hook lines");
            return Err(GenerationError::EmptyResponse(
                "Failed to parse hooks from response. Please try again.".to_string(),
            ));
        }
        Ok(pad_hooks(prefer_within(hooks, settings.max_length)))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn check_connection(&self) -> bool {
        let Some(api_key) = self.api_key.as_deref() else {
            return false;
        };
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: "Test",
            }],
            temperature: None,
            max_tokens: 1,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
            stream: false,
        };
        match self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "connection check failed");
                false
            }
        }
    }
}

//=========================================================================================
// Prompt Construction
//=========================================================================================

fn system_prompt(settings: &GenerationSettings) -> String {
    let emojis = if settings.include_emojis {
        "- Enhanced with relevant emojis"
    } else {
        "- Without emojis"
    };
    let hashtags = if settings.include_hashtags {
        "- Including strategic hashtags"
    } else {
        "- Without hashtags"
    };

    format!(
        "You are an expert viral content creator and marketing strategist with deep knowledge of social media psychology and engagement patterns.

Your expertise includes:
- Understanding what makes content go viral across different platforms
- Psychology of attention-grabbing headlines and hooks
- Platform-specific optimization ({platform})
- Audience targeting for {audience}
- {style} content creation

Generate exactly 5 unique, high-converting hooks that are:
- Optimized for {platform}
- Written in a {tone} tone
- Targeted at {audience}
- Following {style} style guidelines
- Under {max_length} characters each
{emojis}
{hashtags}

Format: Return only the hooks, numbered 1-5, one per line. No additional text or explanations.",
        platform = settings.platform.as_str(),
        audience = settings.audience.as_str(),
        style = settings.style.as_str(),
        tone = settings.tone.as_str(),
        max_length = settings.max_length,
        emojis = emojis,
        hashtags = hashtags,
    )
}

fn style_instruction(style: Style) -> &'static str {
    match style {
        Style::Viral => "Create hooks that are shocking, controversial, or extremely compelling. Use power words and emotional triggers.",
        Style::Professional => "Create authoritative, credible hooks that establish expertise and trust. Focus on value and results.",
        Style::Casual => "Create friendly, conversational hooks that feel personal and relatable. Use everyday language.",
        Style::Controversial => "Create bold, debate-sparking hooks that challenge common beliefs. Be provocative but not offensive.",
        Style::Educational => "Create informative hooks that promise valuable learning. Focus on insights and knowledge sharing.",
    }
}

fn platform_instruction(platform: Platform) -> &'static str {
    match platform {
        Platform::Twitter => "Optimize for Twitter/X with concise, punchy language. Consider thread potential.",
        Platform::Linkedin => "Professional tone suitable for business networking. Focus on career and business value.",
        Platform::Instagram => "Visual-first thinking with lifestyle appeal. Consider story potential.",
        Platform::Tiktok => "Trend-aware with youth appeal. Consider video content potential.",
        Platform::Youtube => "Title-optimized for search and click-through. Consider thumbnail appeal.",
        Platform::General => "Versatile hooks that work across multiple platforms.",
    }
}

fn user_prompt(topic: &str, settings: &GenerationSettings) -> String {
    let emojis = if settings.include_emojis {
        "Use emojis where they add punch."
    } else {
        "Do not use emojis."
    };
    let hashtags = if settings.include_hashtags {
        "End each hook with one or two relevant hashtags."
    } else {
        "Do not use hashtags."
    };

    format!(
        "Topic: \"{topic}\"

Style Guidelines: {style_text}

Platform Focus: {platform_text}

Length: keep every hook under {max_length} characters. {emojis} {hashtags}

Create 5 {style} hooks about \"{topic}\" that will maximize engagement and drive action.",
        topic = topic,
        style_text = style_instruction(settings.style),
        platform_text = platform_instruction(settings.platform),
        max_length = settings.max_length,
        emojis = emojis,
        hashtags = hashtags,
        style = settings.style.as_str(),
    )
}

//=========================================================================================
// Response Normalization
//=========================================================================================

/// Splits the completion into cleaned hook lines, dropping numbering, bullets and
/// lines too short or too long to be a hook.
fn parse_hooks(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let line = NUMBERING.replace(line, "");
            BULLET.replace(&line, "").trim().to_string()
        })
        .filter(|line| {
            let len = line.chars().count();
            len > MIN_HOOK_CHARS && len < MAX_HOOK_CHARS
        })
        .collect()
}

/// Keeps only the lines that fit `max_length` when at least one does; otherwise keeps all.
fn prefer_within(hooks: Vec<String>, max_length: u32) -> Vec<String> {
    let limit = max_length as usize;
    if !hooks.iter().any(|h| h.chars().count() <= limit) {
        return hooks;
    }
    hooks
        .into_iter()
        .filter(|h| h.chars().count() <= limit)
        .collect()
}

/// Tops a short batch up to `BATCH_SIZE` with mechanical variants of the lines the
/// model did return, then truncates to `BATCH_SIZE`.
fn pad_hooks(mut hooks: Vec<String>) -> Vec<String> {
    let produced = hooks.len();
    while produced > 0 && hooks.len() < BATCH_SIZE {
        let position = hooks.len();
        let variant = vary(&hooks[position % produced], position - 1);
        hooks.push(variant);
    }
    hooks.truncate(BATCH_SIZE);
    hooks
}

fn vary(base: &str, variation: usize) -> String {
    match variation {
        0 => format!(
            "{} (you need to see this)",
            base.strip_suffix('?').unwrap_or(base)
        ),
        1 => format!("{} - here's why", base.strip_suffix('.').unwrap_or(base)),
        2 => format!("{} 🔥", base),
        _ => format!("BREAKING: {}", base.to_lowercase()),
    }
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::remote(
            RemoteErrorKind::Timeout,
            "The generation service did not respond in time. Please try again.",
        )
    } else {
        GenerationError::remote(
            RemoteErrorKind::Unknown,
            format!("Network error occurred: {}", e),
        )
    }
}

fn status_error(status: u16, body: &str) -> GenerationError {
    let upstream = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("HTTP {}", status));

    let kind = RemoteErrorKind::from_status(status);
    let message = match kind {
        RemoteErrorKind::Unauthorized => {
            "Invalid API key. Please check your Groq API key configuration.".to_string()
        }
        RemoteErrorKind::RateLimited => {
            "Rate limit exceeded. Please try again in a moment.".to_string()
        }
        RemoteErrorKind::BadRequest => format!("Invalid request: {}", upstream),
        _ => format!("API Error: {}", upstream),
    };
    GenerationError::remote(kind, message)
}
