mod engine;
mod engine_config;

pub use engine::ExportEngine;
pub use engine_config::ExportEngineConfig;
