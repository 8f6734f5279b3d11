/// Seed plan loading from config.toml
pub mod plans;

/// Runtime settings from environment variables
pub mod settings;
