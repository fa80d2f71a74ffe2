//! Request controllers for the search client.
//!
//! Each controller owns its state and its phase. A trigger is accepted
//! only when the phase is `Idle`, causes exactly one engine call, and
//! returns the phase to `Idle` with the resulting state mutation
//! applied (replace the document collection, merge judge verdicts, or
//! set the engine option).

mod info;
mod search;
mod types;

pub use info::{InfoController, UNKNOWN_OPTION};
pub use search::{CancelHandle, ParamsUpdate, SearchController};
pub use types::{ControllerError, RequestPhase};
