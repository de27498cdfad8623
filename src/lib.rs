// Library exports for the Snakepit bot
// This allows the replay tool, the host harness and the tests to use the core engine

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod grid;
pub mod projection;
pub mod reachability;
pub mod replay;
pub mod scorer;
pub mod session;
pub mod types;
