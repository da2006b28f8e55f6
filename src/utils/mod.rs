/// App context
pub mod app_context;
/// Chain constants
pub mod constants;
/// Logger
pub mod logger;
/// Providers
pub mod providers;
