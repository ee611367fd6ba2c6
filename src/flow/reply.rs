//! Send flow: post the pending input and append the personality's reply

use super::{FlowError, FlowOutcome, FlowRejected, FlowResult, NO_REPLY};
use crate::backend::{Backend, BackendError, GenerateRequest, GenerateResponse};
use crate::session::Session;

/// Classify a generation result. An `error` field wins over any reply.
pub(crate) fn interpret_reply(
    result: Result<GenerateResponse, BackendError>,
) -> Result<String, FlowError> {
    let response = result?;
    if let Some(error) = response.error {
        return Err(FlowError::Backend(error));
    }
    response
        .response
        .ok_or_else(|| FlowError::Malformed(NO_REPLY.to_string()))
}

impl<B: Backend> Session<B> {
    /// Send the pending input as a user turn.
    ///
    /// The user message is appended before the call and stays in the log
    /// whatever the outcome.
    pub async fn send(&self) -> FlowResult {
        if !self.has_input() {
            return Err(FlowRejected::EmptyInput);
        }
        let _guard = self.gate.try_acquire().ok_or(FlowRejected::Busy)?;

        let text = self.take_input();
        if text.is_empty() {
            return Err(FlowRejected::EmptyInput);
        }

        let request = {
            let mut state = self.state();
            state.log.append_user(text);
            GenerateRequest {
                messages: state.backend_history(),
                personality: state.selection.personality.clone(),
                use_memory: state.selection.use_memory,
            }
        };

        tracing::debug!(
            personality = %request.personality,
            use_memory = request.use_memory,
            history = request.messages.len(),
            "Requesting reply"
        );
        let result = self.backend.generate_response(&request).await;

        match interpret_reply(result) {
            Ok(reply) => {
                self.state().log.append_assistant(reply);
                Ok(FlowOutcome::Completed)
            }
            Err(err) => {
                tracing::warn!(class = err.class(), error = %err, "Send failed");
                self.notice(err.to_string());
                Ok(FlowOutcome::Recovered(err))
            }
        }
    }
}
