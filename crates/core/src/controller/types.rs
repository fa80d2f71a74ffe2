//! Types for the request controllers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineError;

/// Activity state of a controller.
///
/// Only `Idle` accepts new triggers; each controller owns its phase and
/// holds at most one request in flight.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestPhase {
    #[default]
    Idle,
    Searching,
    Judging,
    LoadingInfo,
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestPhase::Idle => "idle",
            RequestPhase::Searching => "searching",
            RequestPhase::Judging => "judging",
            RequestPhase::LoadingInfo => "loading_info",
        };
        f.write_str(name)
    }
}

/// Errors produced by controller commands.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A trigger arrived while another request was in flight.
    #[error("request already in flight (phase: {0})")]
    Busy(RequestPhase),

    /// The engine call failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Judge response entry count differs from the submitted id count.
    #[error("judge returned {received} verdicts for {submitted} submitted ids")]
    JudgeMismatch { submitted: usize, received: usize },

    /// The in-flight request was cancelled before completion.
    #[error("request cancelled")]
    Cancelled,
}

impl ControllerError {
    /// The human-readable detail to surface to the user.
    pub fn message(&self) -> String {
        match self {
            ControllerError::Engine(e) => e.message().to_string(),
            other => other.to_string(),
        }
    }
}
