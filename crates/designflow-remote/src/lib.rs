//! Designflow Remote - external collaborators behind narrow contracts
//!
//! Everything the flow core needs from the outside world: filtered record
//! reads and generic inserts against the backing data store, opaque file
//! uploads, the generation request service, and the chat completion
//! proxy. Each collaborator is an async trait with a REST implementation
//! and an in-memory double for tests.

pub mod chat;
pub mod error;
pub mod generation;
pub mod mock;
pub mod rest;
pub mod session;
pub mod store;

// Re-export key types
pub use chat::{ChatClient, ChatMessage, RestChatClient};
pub use error::{RemoteError, Result};
pub use generation::{GeneratedAsset, GenerationClient, RestGenerationClient};
pub use rest::{RemoteConfig, RestFileStorage, RestRecordStore};
pub use session::{Permission, Role, Session};
pub use store::{FileStorage, Filter, RecordStore};
