//! Extracted long-term memory
//!
//! A snapshot is whatever the most recent successful extraction returned.
//! Snapshots replace each other wholesale; nothing is merged.

use serde::{Deserialize, Serialize};

/// Structured result of one extraction call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Vec<Preference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_patterns: Option<Vec<EmotionalPattern>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<Vec<Fact>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl MemorySnapshot {
    pub fn preferences(&self) -> &[Preference] {
        self.preferences.as_deref().unwrap_or_default()
    }

    pub fn emotional_patterns(&self) -> &[EmotionalPattern] {
        self.emotional_patterns.as_deref().unwrap_or_default()
    }

    pub fn facts(&self) -> &[Fact] {
        self.facts.as_deref().unwrap_or_default()
    }

    /// True when no section carries anything worth showing
    pub fn is_blank(&self) -> bool {
        self.preferences().is_empty()
            && self.emotional_patterns().is_empty()
            && self.facts().is_empty()
            && self.summary.as_deref().map_or(true, str::is_empty)
    }
}

/// Something the user likes or dislikes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub category: String,
    pub preference: String,
    /// 0.0..=1.0
    pub confidence: f64,
    pub evidence: String,
}

impl Preference {
    /// Confidence as a whole percentage, clamped
    pub fn confidence_percent(&self) -> u8 {
        // Clamped to 0..=100 first, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8;
        pct
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalPattern {
    pub emotion: String,
    pub frequency: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// "high", "medium" or "low"
    pub importance: String,
    pub fact: String,
    pub category: String,
    pub evidence: String,
}
