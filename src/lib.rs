//! Persona Engine - client-side orchestration for a personality chat backend
//!
//! Holds the conversation, the personality and memory toggles, and runs the
//! three user-triggered flows (send, extract memory, compare personalities)
//! against a remote backend, one request at a time.

pub mod backend;
pub mod catalog;
pub mod comparison;
pub mod config;
pub mod conversation;
pub mod flow;
pub mod gate;
pub mod memory;
pub mod session;

pub use backend::{Backend, BackendError, HttpBackend, LoggingBackend};
pub use catalog::{Personality, PersonalityCatalog};
pub use comparison::{ComparisonEntry, ComparisonSet};
pub use config::ClientConfig;
pub use conversation::{ConversationLog, Message, Role};
pub use flow::{FlowError, FlowOutcome, FlowRejected, FlowResult};
pub use memory::MemorySnapshot;
pub use session::{SelectionState, Session};
