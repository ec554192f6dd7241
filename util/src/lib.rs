pub mod clock;
pub mod config;
pub mod failure;
pub mod metrics;
pub mod state;
pub mod weather;
