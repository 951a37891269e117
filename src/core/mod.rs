pub mod config;
pub mod date;
pub mod digits;
pub mod engine;
pub mod error;
pub mod event;
pub mod event_bus;
pub mod intercept;
pub mod plugin;
