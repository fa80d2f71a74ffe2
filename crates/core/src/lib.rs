pub mod config;
pub mod controller;
pub mod engine;
pub mod metrics;
pub mod testing;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use controller::{
    CancelHandle, ControllerError, InfoController, ParamsUpdate, RequestPhase, SearchController,
    UNKNOWN_OPTION,
};
pub use engine::{
    Document, EngineClient, EngineConfig, EngineError, EngineInfo, HttpEngineClient, JudgeEntry,
    SearchParams, Verdict,
};
