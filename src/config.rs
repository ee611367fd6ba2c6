//! Client configuration

/// Personalities every comparison asks for
pub const COMPARISON_ROSTER: [&str; 4] =
    ["neutral", "calm_mentor", "witty_friend", "therapist_style"];

pub const DEFAULT_PERSONALITY: &str = "neutral";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8888/.netlify/functions";

pub const BASE_URL_ENV: &str = "PERSONA_API_URL";

pub const WELCOME_NOTICE: &str = "Welcome! Start chatting to see how different personalities respond. Try extracting memory after a few messages!";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint paths are joined onto this
    pub base_url: String,
    pub comparison_roster: Vec<String>,
    /// Selected personality before the user picks one
    pub default_personality: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            comparison_roster: COMPARISON_ROSTER.iter().map(ToString::to_string).collect(),
            default_personality: DEFAULT_PERSONALITY.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::with_base_url(std::env::var(BASE_URL_ENV).ok())
    }

    fn with_base_url(base_url: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        config
    }
}
