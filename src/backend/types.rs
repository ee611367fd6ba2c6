//! Wire types for the backend endpoints

use crate::catalog::Personality;
use crate::comparison::ComparisonSet;
use crate::conversation::{Message, Role};
use crate::memory::{EmotionalPattern, Fact, MemorySnapshot, Preference};
use serde::{Deserialize, Serialize};

/// History entry as the backend sees it. There is no system flag on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for WireMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PersonalitiesResponse {
    #[serde(default)]
    pub personalities: Vec<Personality>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub messages: Vec<WireMessage>,
    pub personality: String,
    pub use_memory: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            response: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub messages: Vec<WireMessage>,
}

/// Either the memory sections or an `error`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub preferences: Option<Vec<Preference>>,
    #[serde(default)]
    pub emotional_patterns: Option<Vec<EmotionalPattern>>,
    #[serde(default)]
    pub facts: Option<Vec<Fact>>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl ExtractResponse {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn into_snapshot(self) -> MemorySnapshot {
        MemorySnapshot {
            preferences: self.preferences,
            emotional_patterns: self.emotional_patterns,
            facts: self.facts,
            summary: self.summary,
        }
    }
}

impl From<MemorySnapshot> for ExtractResponse {
    fn from(snap: MemorySnapshot) -> Self {
        Self {
            error: None,
            preferences: snap.preferences,
            emotional_patterns: snap.emotional_patterns,
            facts: snap.facts,
            summary: snap.summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub messages: Vec<WireMessage>,
    pub user_message: String,
    pub personalities: Vec<String>,
    pub use_memory: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    pub comparisons: Option<ComparisonSet>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CompareResponse {
    pub fn with(comparisons: ComparisonSet) -> Self {
        Self {
            comparisons: Some(comparisons),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            comparisons: None,
            error: Some(error.into()),
        }
    }
}
