//! Session controller
//!
//! Owns the whole client-side application state: transcript, selection,
//! memory snapshot, comparison panel, pending input and the request gate.
//! All mutation goes through methods here or in the flow modules.

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod testing;

use crate::backend::{Backend, WireMessage};
use crate::catalog::{Personality, PersonalityCatalog};
use crate::comparison::ComparisonSet;
use crate::config::{ClientConfig, WELCOME_NOTICE};
use crate::conversation::{ConversationLog, Message};
use crate::gate::RequestGate;
use crate::memory::MemorySnapshot;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Personality and memory toggles applied to every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub personality: String,
    pub use_memory: bool,
}

#[derive(Debug)]
pub(crate) struct AppState {
    pub(crate) log: ConversationLog,
    pub(crate) selection: SelectionState,
    pub(crate) memory: Option<MemorySnapshot>,
    pub(crate) comparisons: Option<ComparisonSet>,
    pub(crate) input: String,
}

impl AppState {
    pub(crate) fn backend_history(&self) -> Vec<WireMessage> {
        self.log.for_backend().map(WireMessage::from).collect()
    }
}

pub struct Session<B> {
    pub(crate) backend: B,
    pub(crate) config: ClientConfig,
    catalog: OnceLock<PersonalityCatalog>,
    pub(crate) gate: RequestGate,
    // Locked only between awaits; the gate is what serializes flows.
    state: Mutex<AppState>,
}

impl<B: Backend> Session<B> {
    pub fn new(backend: B, config: ClientConfig) -> Self {
        let selection = SelectionState {
            personality: config.default_personality.clone(),
            use_memory: false,
        };

        Self {
            backend,
            config,
            catalog: OnceLock::new(),
            gate: RequestGate::new(),
            state: Mutex::new(AppState {
                log: ConversationLog::new(),
                selection,
                memory: None,
                comparisons: None,
                input: String::new(),
            }),
        }
    }

    /// Load the personality catalog and post the welcome notice.
    /// Only the first call has any effect.
    pub async fn start(&self) {
        if self.catalog.get().is_some() {
            return;
        }

        let catalog = PersonalityCatalog::load(&self.backend).await;
        if self.catalog.set(catalog).is_ok() {
            self.notice(WELCOME_NOTICE);
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn notice(&self, text: impl Into<String>) {
        self.state().log.append_system_notice(text);
    }

    /// Empty until [`Session::start`] has run, or if loading failed
    pub fn personalities(&self) -> &[Personality] {
        self.catalog
            .get()
            .map(PersonalityCatalog::personalities)
            .unwrap_or_default()
    }

    pub fn select_personality(&self, key: impl Into<String>) {
        let key = key.into();
        if let Some(catalog) = self.catalog.get() {
            if !catalog.is_empty() && !catalog.contains(&key) {
                tracing::warn!(personality = %key, "Selected personality is not in the catalog");
            }
        }
        self.state().selection.personality = key;
    }

    pub fn set_use_memory(&self, use_memory: bool) {
        self.state().selection.use_memory = use_memory;
    }

    pub fn selection(&self) -> SelectionState {
        self.state().selection.clone()
    }

    /// Replace the pending input consumed by send and compare
    pub fn set_input(&self, text: impl Into<String>) {
        self.state().input = text.into();
    }

    pub fn input(&self) -> String {
        self.state().input.clone()
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.state().log.messages().to_vec()
    }

    /// Transcript entries from `index` on, for incremental rendering
    pub fn transcript_since(&self, index: usize) -> Vec<Message> {
        self.state()
            .log
            .messages()
            .get(index..)
            .map(<[Message]>::to_vec)
            .unwrap_or_default()
    }

    pub fn memory(&self) -> Option<MemorySnapshot> {
        self.state().memory.clone()
    }

    pub fn comparisons(&self) -> Option<ComparisonSet> {
        self.state().comparisons.clone()
    }

    /// Close the comparison panel
    pub fn close_comparison(&self) {
        self.state().comparisons = None;
    }

    /// True while a flow holds the request gate; triggers should be disabled
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    pub(crate) fn take_input(&self) -> String {
        let mut state = self.state();
        let text = state.input.trim().to_string();
        state.input.clear();
        text
    }

    pub(crate) fn has_input(&self) -> bool {
        !self.state().input.trim().is_empty()
    }
}
