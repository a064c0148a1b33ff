//! crates/cloutline_core/src/orchestrator.rs
//!
//! Chooses between the remote and template paths and turns raw texts into `Hook` records.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

use crate::category::categorize;
use crate::domain::{GenerationSettings, Hook};
use crate::error::GenerationError;
use crate::ports::HookGenerationService;
use crate::synthesizer::TemplateSynthesizer;

pub const TEMPLATE_ENGAGEMENT: RangeInclusive<u32> = 50..=149;
pub const REMOTE_ENGAGEMENT: RangeInclusive<u32> = 80..=99;

/// Runs one generation request end to end.
///
/// A failed remote call is returned to the caller as-is. There is no fallback
/// to the template path once the caller has asked for the remote one.
pub struct GenerationOrchestrator {
    remote: Arc<dyn HookGenerationService>,
    synthesizer: TemplateSynthesizer,
    rng: Mutex<StdRng>,
}

impl GenerationOrchestrator {
    pub fn new(remote: Arc<dyn HookGenerationService>) -> Self {
        Self {
            remote,
            synthesizer: TemplateSynthesizer::new(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// A fully deterministic orchestrator for tests.
    pub fn with_seed(remote: Arc<dyn HookGenerationService>, seed: u64) -> Self {
        Self {
            remote,
            synthesizer: TemplateSynthesizer::with_seed(seed),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn remote(&self) -> &Arc<dyn HookGenerationService> {
        &self.remote
    }

    pub async fn run(
        &self,
        topic: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<Hook>, GenerationError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GenerationError::Validation("Topic is required".to_string()));
        }
        settings.validate()?;

        let hooks = if settings.use_remote_api {
            debug!(topic, "generating hooks through the remote service");
            let texts = self.remote.generate_hooks(topic, settings).await?;
            self.wrap(texts, topic, settings, true)
        } else {
            debug!(topic, "generating hooks from templates");
            let texts = self.synthesizer.synthesize(topic);
            self.wrap(texts, topic, settings, false)
        };

        info!(
            topic,
            count = hooks.len(),
            remote = settings.use_remote_api,
            "hooks generated"
        );
        Ok(hooks)
    }

    fn wrap(
        &self,
        texts: Vec<String>,
        topic: &str,
        settings: &GenerationSettings,
        remote: bool,
    ) -> Vec<Hook> {
        let category = categorize(topic);
        let created_at = Utc::now();
        let batch = Uuid::new_v4().simple().to_string();
        let (prefix, range) = if remote {
            ("ai-hook", REMOTE_ENGAGEMENT)
        } else {
            ("hook", TEMPLATE_ENGAGEMENT)
        };
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Hook {
                id: format!("{}-{}-{}", prefix, batch, index),
                text,
                topic: topic.to_string(),
                category: category.to_string(),
                created_at,
                engagement: rng.gen_range(range.clone()),
                platform: remote.then_some(settings.platform),
                style: remote.then_some(settings.style),
                audience: remote.then_some(settings.audience),
                is_ai_generated: remote.then_some(true),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Platform, Style};
    use crate::error::RemoteErrorKind;
    use async_trait::async_trait;
    use std::collections::HashSet;

    /// A remote double returning a canned outcome.
    struct StubRemote {
        outcome: Result<Vec<String>, RemoteErrorKind>,
        configured: bool,
    }

    #[async_trait]
    impl HookGenerationService for StubRemote {
        async fn generate_hooks(
            &self,
            _topic: &str,
            _settings: &GenerationSettings,
        ) -> Result<Vec<String>, GenerationError> {
            if !self.configured {
                return Err(GenerationError::Configuration("no key".into()));
            }
            self.outcome
                .clone()
                .map_err(|kind| GenerationError::remote(kind, "stub failure"))
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn check_connection(&self) -> bool {
            self.configured
        }
    }

    fn remote_ok() -> Arc<dyn HookGenerationService> {
        Arc::new(StubRemote {
            outcome: Ok((1..=5).map(|i| format!("Remote fitness hook number {}", i)).collect()),
            configured: true,
        })
    }

    fn remote_settings() -> GenerationSettings {
        GenerationSettings {
            use_remote_api: true,
            platform: Platform::Linkedin,
            style: Style::Professional,
            ..GenerationSettings::default()
        }
    }

    #[tokio::test]
    async fn template_path_builds_fitness_hooks() {
        let orchestrator = GenerationOrchestrator::with_seed(remote_ok(), 11);
        let hooks = orchestrator
            .run("fitness", &GenerationSettings::default())
            .await
            .unwrap();

        assert_eq!(hooks.len(), 5);
        let ids: HashSet<_> = hooks.iter().map(|h| h.id.clone()).collect();
        assert_eq!(ids.len(), 5);
        for hook in &hooks {
            assert_eq!(hook.category, "Health & Fitness");
            assert!(hook.text.contains("fitness"));
            assert!(TEMPLATE_ENGAGEMENT.contains(&hook.engagement));
            assert_eq!(hook.is_ai_generated, None);
            assert_eq!(hook.platform, None);
            assert!(hook.id.starts_with("hook-"));
        }
    }

    #[tokio::test]
    async fn remote_path_marks_hooks_and_echoes_settings() {
        let orchestrator = GenerationOrchestrator::new(remote_ok());
        let hooks = orchestrator.run("fitness", &remote_settings()).await.unwrap();

        assert_eq!(hooks.len(), 5);
        assert_eq!(hooks[0].text, "Remote fitness hook number 1");
        assert_eq!(hooks[4].text, "Remote fitness hook number 5");
        for hook in &hooks {
            assert_eq!(hook.category, "Health & Fitness");
            assert!(REMOTE_ENGAGEMENT.contains(&hook.engagement));
            assert_eq!(hook.is_ai_generated, Some(true));
            assert_eq!(hook.platform, Some(Platform::Linkedin));
            assert_eq!(hook.style, Some(Style::Professional));
            assert!(hook.id.starts_with("ai-hook-"));
        }
    }

    #[tokio::test]
    async fn remote_failure_is_not_masked_by_templates() {
        let remote = Arc::new(StubRemote {
            outcome: Err(RemoteErrorKind::RateLimited),
            configured: true,
        });
        let orchestrator = GenerationOrchestrator::new(remote);
        let err = orchestrator.run("fitness", &remote_settings()).await.unwrap_err();

        assert!(matches!(
            err,
            GenerationError::RemoteService {
                kind: RemoteErrorKind::RateLimited,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn missing_credential_surfaces_configuration_error() {
        let remote = Arc::new(StubRemote {
            outcome: Ok(vec![]),
            configured: false,
        });
        let orchestrator = GenerationOrchestrator::new(remote);
        let err = orchestrator.run("fitness", &remote_settings()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
    }

    #[tokio::test]
    async fn rejects_blank_topic_and_bad_settings() {
        let orchestrator = GenerationOrchestrator::new(remote_ok());

        let err = orchestrator
            .run("   ", &GenerationSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));

        let settings = GenerationSettings {
            max_length: 99,
            ..GenerationSettings::default()
        };
        let err = orchestrator.run("fitness", &settings).await.unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));
    }

    #[tokio::test]
    async fn category_is_the_same_on_both_paths() {
        let orchestrator = GenerationOrchestrator::new(remote_ok());
        let template = orchestrator
            .run("travel hacks", &GenerationSettings::default())
            .await
            .unwrap();
        let remote = orchestrator.run("travel hacks", &remote_settings()).await.unwrap();
        assert_eq!(template[0].category, remote[0].category);
    }

    #[tokio::test]
    async fn ids_do_not_repeat_across_batches() {
        let orchestrator = GenerationOrchestrator::new(remote_ok());
        let settings = GenerationSettings::default();
        let first = orchestrator.run("cats", &settings).await.unwrap();
        let second = orchestrator.run("cats", &settings).await.unwrap();
        for hook in &first {
            assert!(second.iter().all(|other| other.id != hook.id));
        }
    }
}
