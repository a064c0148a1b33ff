pub mod category;
pub mod daily;
pub mod domain;
pub mod error;
pub mod export;
pub mod insights;
pub mod orchestrator;
pub mod ports;
pub mod share;
pub mod store;
pub mod synthesizer;

pub use domain::{
    ActionKind, Audience, GenerationHistory, GenerationSettings, Hook, Platform, Style, Tone,
    UserStats,
};
pub use error::{GenerationError, RemoteErrorKind};
pub use orchestrator::GenerationOrchestrator;
pub use ports::{HookGenerationService, KeyValueStore, PortError, PortResult};
pub use store::PersistenceStore;
pub use synthesizer::TemplateSynthesizer;
