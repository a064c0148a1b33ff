pub mod file_store;
pub mod groq_llm;
pub mod memory_store;

pub use file_store::JsonFileStore;
pub use groq_llm::GroqHookAdapter;
pub use memory_store::MemoryStore;
