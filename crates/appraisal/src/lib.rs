pub mod config;
pub mod error;
pub mod handbooks;
pub mod numeric;
pub mod telemetry;
pub mod worksheet;
