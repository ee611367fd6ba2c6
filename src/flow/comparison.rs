//! Compare flow: ask every roster personality to answer a held-out probe

use super::{FlowError, FlowOutcome, FlowRejected, FlowResult, EMPTY_PROBE_NOTICE, NO_COMPARISONS};
use crate::backend::{Backend, BackendError, CompareRequest, CompareResponse};
use crate::comparison::ComparisonSet;
use crate::session::Session;

pub(crate) fn interpret_comparison(
    result: Result<CompareResponse, BackendError>,
) -> Result<ComparisonSet, FlowError> {
    let response = result?;
    if let Some(error) = response.error {
        return Err(FlowError::Backend(error));
    }
    match response.comparisons {
        Some(set) if !set.is_empty() => Ok(set),
        _ => Err(FlowError::Malformed(NO_COMPARISONS.to_string())),
    }
}

impl<B: Backend> Session<B> {
    /// Compare roster personalities on the pending input.
    ///
    /// The probe is sent as `user_message` and never enters the log.
    pub async fn compare(&self) -> FlowResult {
        if !self.has_input() {
            self.notice(EMPTY_PROBE_NOTICE);
            return Err(FlowRejected::EmptyInput);
        }
        let _guard = self.gate.try_acquire().ok_or(FlowRejected::Busy)?;

        let probe = self.take_input();
        if probe.is_empty() {
            return Err(FlowRejected::EmptyInput);
        }

        let request = {
            let state = self.state();
            CompareRequest {
                messages: state.backend_history(),
                user_message: probe.clone(),
                personalities: self.config.comparison_roster.clone(),
                use_memory: state.selection.use_memory,
            }
        };

        tracing::debug!(
            roster = ?request.personalities,
            history = request.messages.len(),
            "Requesting comparison"
        );
        let result = self.backend.compare_personalities(&request).await;

        match interpret_comparison(result) {
            Ok(set) => {
                let count = set.len();
                let mut state = self.state();
                state.comparisons = Some(set);
                state.log.append_system_notice(format!(
                    "Comparing {count} personalities for: \"{probe}\""
                ));
                Ok(FlowOutcome::Completed)
            }
            Err(err) => {
                if let FlowError::Malformed(_) = err {
                    tracing::error!(probe = %probe, "Comparison succeeded without comparisons");
                } else {
                    tracing::warn!(class = err.class(), error = %err, "Comparison failed");
                }
                self.notice(err.to_string());
                Ok(FlowOutcome::Recovered(err))
            }
        }
    }
}
