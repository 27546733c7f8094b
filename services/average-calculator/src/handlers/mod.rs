//! API handlers for the calculator endpoints

pub mod health;
pub mod numbers;

pub use health::HealthHandlers;
pub use numbers::NumberHandlers;
