//! Extract flow: replace the memory snapshot from the current conversation

use super::{FlowError, FlowOutcome, FlowRejected, FlowResult, EMPTY_LOG_NOTICE};
use crate::backend::{Backend, BackendError, ExtractRequest, ExtractResponse};
use crate::memory::MemorySnapshot;
use crate::session::Session;

pub(crate) fn interpret_extraction(
    result: Result<ExtractResponse, BackendError>,
) -> Result<MemorySnapshot, FlowError> {
    let response = result?;
    if let Some(error) = response.error {
        return Err(FlowError::Backend(error));
    }
    Ok(response.into_snapshot())
}

impl<B: Backend> Session<B> {
    /// Extract memory from the conversation so far.
    ///
    /// Notices are filtered from the payload like every other flow, so a log
    /// holding only notices counts as empty. On failure the previous snapshot
    /// stays in place.
    pub async fn extract_memory(&self) -> FlowResult {
        let request = {
            let mut state = self.state();
            let messages = state.backend_history();
            if messages.is_empty() {
                state.log.append_system_notice(EMPTY_LOG_NOTICE);
                return Err(FlowRejected::EmptyLog);
            }
            ExtractRequest { messages }
        };
        let _guard = self.gate.try_acquire().ok_or(FlowRejected::Busy)?;

        tracing::debug!(history = request.messages.len(), "Requesting memory extraction");
        let result = self.backend.extract_memory(&request).await;

        match interpret_extraction(result) {
            Ok(snapshot) => {
                tracing::info!(
                    preferences = snapshot.preferences().len(),
                    emotional_patterns = snapshot.emotional_patterns().len(),
                    facts = snapshot.facts().len(),
                    "Memory extracted"
                );
                self.state().memory = Some(snapshot);
                Ok(FlowOutcome::Completed)
            }
            Err(err) => {
                tracing::warn!(class = err.class(), error = %err, "Memory extraction failed");
                self.notice(err.to_string());
                Ok(FlowOutcome::Recovered(err))
            }
        }
    }
}
