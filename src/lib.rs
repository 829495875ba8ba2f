pub mod commands;
pub mod config;
pub mod export;
pub mod output;
pub mod roster;
pub mod stats;
pub mod stderr_buffer;
pub mod storage;
pub mod tui;
