//! Selectable personalities, fetched once at startup

use crate::backend::Backend;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    /// Wire value sent as `personality`
    pub key: String,
    /// Display label
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PersonalityCatalog {
    personalities: Vec<Personality>,
}

impl PersonalityCatalog {
    pub fn new(personalities: Vec<Personality>) -> Self {
        Self { personalities }
    }

    /// Fetch the roster. A failure is logged and yields an empty catalog so
    /// startup is never blocked on it.
    pub async fn load<B: Backend + ?Sized>(backend: &B) -> Self {
        match backend.personalities().await {
            Ok(personalities) => {
                tracing::info!(count = personalities.len(), "Loaded personalities");
                Self::new(personalities)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load personalities");
                Self::default()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Personality> {
        self.personalities.iter().find(|p| p.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn personalities(&self) -> &[Personality] {
        &self.personalities
    }

    pub fn is_empty(&self) -> bool {
        self.personalities.is_empty()
    }
}
