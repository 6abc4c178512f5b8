// Library exports for the move selector
// This allows the replay tool and the integration tests to use the core selection logic

pub mod config;
pub mod crowd;
pub mod debug_logger;
pub mod grid;
pub mod replay;
pub mod search;
pub mod selector;
pub mod types;
