pub mod backend;
pub mod learning;
pub mod sqlite;
pub mod store;

pub use backend::{open_backend, FileBackend, MemoryBackend};
pub use learning::{pattern_key, LearningEngine, LearningSnapshot, PersonalityTrait, TraitName};
pub use sqlite::SqliteBackend;
pub use store::{ConversationStore, KeyValueBackend, StoreError, StoreResult};
