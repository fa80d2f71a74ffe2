//! Engine info controller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::engine::EngineClient;

use super::types::{ControllerError, RequestPhase};

/// Label rendered when the engine option is not known.
pub const UNKNOWN_OPTION: &str = "unknown";

/// Fetches the engine capability report, typically once at startup.
///
/// Independent of the search controller; the two may have requests in
/// flight concurrently.
pub struct InfoController {
    engine: Arc<dyn EngineClient>,
    engine_option: Option<String>,
    phase: RequestPhase,
}

impl InfoController {
    pub fn new(engine: Arc<dyn EngineClient>) -> Self {
        Self {
            engine,
            engine_option: None,
            phase: RequestPhase::Idle,
        }
    }

    /// The engine option label; always renderable.
    pub fn option_label(&self) -> &str {
        self.engine_option.as_deref().unwrap_or(UNKNOWN_OPTION)
    }

    /// Current phase.
    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// Fetch the engine info.
    ///
    /// On failure the option falls back to the `"unknown"` sentinel and
    /// the error is returned for surfacing.
    pub async fn load_info(&mut self) -> Result<&str, ControllerError> {
        if self.phase != RequestPhase::Idle {
            warn!(phase = %self.phase, "info request rejected, already in flight");
            return Err(ControllerError::Busy(self.phase));
        }

        self.phase = RequestPhase::LoadingInfo;
        debug!("engine info requested");
        let result = self.engine.info().await;
        self.phase = RequestPhase::Idle;

        match result {
            Ok(report) => {
                info!(option = %report.option, "engine info loaded");
                self.engine_option = Some(report.option);
                Ok(self.option_label())
            }
            Err(e) => {
                self.engine_option = Some(UNKNOWN_OPTION.to_string());
                Err(e.into())
            }
        }
    }
}
